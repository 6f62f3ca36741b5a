use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::storage::{self, SharedStore};

const ALERTS_KEY: &str = "alerts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Fault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    /// RFC 3339 in UTC; display formatting is up to the client
    pub time: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
    pub status: String,
}

pub struct AlertsRepository {
    store: SharedStore,
    write_lock: Mutex<()>,
}

impl AlertsRepository {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All alerts, oldest first
    pub async fn get_all(&self) -> Result<Vec<Alert>> {
        Ok(storage::load(self.store.as_ref(), ALERTS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Record a new active alert
    pub async fn raise(&self, message: &str, severity: Severity) -> Result<Alert> {
        let _guard = self.write_lock.lock().await;
        let mut alerts = self.get_all().await?;

        let now = Utc::now();
        let mut id = now.timestamp_millis();
        while alerts.iter().any(|a| a.id == id.to_string()) {
            id += 1;
        }

        let alert = Alert {
            id: id.to_string(),
            time: now,
            message: message.to_string(),
            severity,
            status: "Active".to_string(),
        };
        alerts.push(alert.clone());
        storage::save(self.store.as_ref(), ALERTS_KEY, &alerts).await?;

        tracing::warn!(alert_id = %alert.id, severity = ?severity, "{}", message);
        Ok(alert)
    }
}
