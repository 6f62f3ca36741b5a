pub mod faults;
pub mod health;
pub mod maintenance;
pub mod monitoring;
pub mod plants;

use std::sync::Arc;

use crate::{
    config::Config,
    repositories::{AlertsRepository, PlantsRepository},
    storage::SharedStore,
    telemetry::{SampleGenerator, SampleSource, TelemetryStore},
};

#[derive(Clone)]
pub struct AppState {
    pub plants: Arc<PlantsRepository>,
    pub alerts: Arc<AlertsRepository>,
    pub telemetry: Arc<TelemetryStore>,
    pub samples: Arc<dyn SampleSource>,
    pub default_days: u32,
    pub upload_limit: usize,
}

impl AppState {
    /// Wire every component onto one document store.
    pub fn new(store: SharedStore, config: &Config) -> Self {
        Self::with_source(store, config, Arc::new(SampleGenerator::new()))
    }

    pub fn with_source(
        store: SharedStore,
        config: &Config,
        samples: Arc<dyn SampleSource>,
    ) -> Self {
        Self {
            plants: Arc::new(PlantsRepository::new(store.clone())),
            alerts: Arc::new(AlertsRepository::new(store.clone())),
            telemetry: Arc::new(TelemetryStore::with_retention(
                store,
                config.telemetry.retention,
            )),
            samples,
            default_days: config.telemetry.default_days,
            upload_limit: config.api.upload_limit,
        }
    }
}
