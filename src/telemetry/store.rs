use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{aggregate_daily, DailyAggregate, DaysWindow, Sample, RETENTION_LIMIT};
use crate::error::{AppError, Result};
use crate::storage::{self, SharedStore};

/// Bounded per-plant sample history with daily aggregation.
///
/// Each plant's history is its own document. Appends for one plant are
/// serialised by a per-plant async mutex held across the read-modify-write,
/// so concurrent appends never lose a sample. Different plants don't contend.
pub struct TelemetryStore {
    store: SharedStore,
    retention: usize,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl TelemetryStore {
    pub fn new(store: SharedStore) -> Self {
        Self::with_retention(store, RETENTION_LIMIT)
    }

    pub fn with_retention(store: SharedStore, retention: usize) -> Self {
        Self {
            store,
            retention: retention.max(1),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Append a sample, evicting the oldest entries beyond the retention bound.
    pub async fn append(&self, plant_id: &str, sample: Sample) -> Result<()> {
        let lock = self.lock_for(plant_id)?;
        let _guard = lock.lock().await;

        let key = history_key(plant_id);
        let mut history: Vec<Sample> = storage::load(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        history.push(sample);
        let evicted = evict_oldest(&mut history, self.retention);
        if evicted > 0 {
            tracing::debug!(plant_id, evicted, "Evicted samples past retention");
        }

        storage::save(self.store.as_ref(), &key, &history).await
    }

    /// Retained samples in append order; empty for an unseen plant.
    pub async fn history(&self, plant_id: &str) -> Result<Vec<Sample>> {
        Ok(storage::load(self.store.as_ref(), &history_key(plant_id))
            .await?
            .unwrap_or_default())
    }

    /// Daily energy totals over the plant's retained history.
    pub async fn query_daily(
        &self,
        plant_id: &str,
        window: DaysWindow,
    ) -> Result<Vec<DailyAggregate>> {
        let history = self.history(plant_id).await?;
        aggregate_daily(&history, window)
    }

    fn lock_for(&self, plant_id: &str) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| AppError::Internal("telemetry lock table poisoned".to_string()))?;
        Ok(locks.entry(plant_id.to_string()).or_default().clone())
    }
}

fn history_key(plant_id: &str) -> String {
    format!("history/{}", plant_id)
}

/// Drop the oldest entries so at most `bound` remain. Returns how many went.
fn evict_oldest(history: &mut Vec<Sample>, bound: usize) -> usize {
    if history.len() <= bound {
        return 0;
    }
    let excess = history.len() - bound;
    history.drain(..excess);
    excess
}
