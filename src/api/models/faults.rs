use serde::{Deserialize, Serialize};

use crate::repositories::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultFinding {
    pub time: String,
    pub inverter_id: String,
    pub issue: String,
    pub severity: Severity,
    pub action: String,
}

impl FaultFinding {
    fn new(time: &str, inverter_id: &str, issue: &str, severity: Severity, action: &str) -> Self {
        Self {
            time: time.to_string(),
            inverter_id: inverter_id.to_string(),
            issue: issue.to_string(),
            severity,
            action: action.to_string(),
        }
    }
}

// No detection model yet; every upload reports the same findings.
pub fn mock_findings() -> Vec<FaultFinding> {
    vec![
        FaultFinding::new(
            "10:30",
            "INV-001",
            "Normal Operation",
            Severity::Normal,
            "No action required",
        ),
        FaultFinding::new(
            "11:45",
            "INV-002",
            "Soiling Detected",
            Severity::Warning,
            "Clean panels",
        ),
        FaultFinding::new(
            "12:15",
            "INV-003",
            "Inverter Anomaly",
            Severity::Fault,
            "Inspect inverter",
        ),
    ]
}
