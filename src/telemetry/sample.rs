use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One telemetry reading for a plant. Field names match what the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub ac_power: f64,
    pub dc_power: f64,
    /// Performance ratio, percent
    pub pr: f64,
    pub daily_yield: f64,
    /// Percent
    pub soiling_index: f64,
    /// W/m²
    pub irradiance: f64,
    pub timestamp: DateTime<Utc>,
}
