use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Sample;
use crate::error::{AppError, Result};

/// Watt-sum to kWh-equivalent conversion.
const ENERGY_DIVISOR: f64 = 1000.0;

/// Summed AC power for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub total_energy: f64,
}

/// Which days of retained history a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysWindow {
    All,
    /// The last `n` calendar days, ending on the day of the newest sample.
    Trailing(u32),
}

/// Bucket samples by UTC day, sum `acPower` per day and scale to energy units.
/// The result is sorted by date with one entry per day.
pub fn aggregate_daily(samples: &[Sample], window: DaysWindow) -> Result<Vec<DailyAggregate>> {
    let cutoff = match window {
        DaysWindow::All => None,
        DaysWindow::Trailing(0) => {
            return Err(AppError::InvalidArgument(
                "days must be at least 1".to_string(),
            ))
        }
        DaysWindow::Trailing(n) => samples
            .iter()
            .map(|s| s.timestamp.date_naive())
            .max()
            .and_then(|latest| latest.checked_sub_signed(Duration::days(i64::from(n) - 1))),
    };

    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sample in samples {
        let date = sample.timestamp.date_naive();
        if cutoff.is_some_and(|c| date < c) {
            continue;
        }
        *days.entry(date).or_insert(0.0) += sample.ac_power;
    }

    Ok(days
        .into_iter()
        .map(|(date, watts)| DailyAggregate {
            date,
            total_energy: watts / ENERGY_DIVISOR,
        })
        .collect())
}
