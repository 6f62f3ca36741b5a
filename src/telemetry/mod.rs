pub mod aggregate;
pub mod generator;
pub mod sample;
pub mod store;

pub use aggregate::{aggregate_daily, DailyAggregate, DaysWindow};
pub use generator::{SampleGenerator, SampleSource};
pub use sample::Sample;
pub use store::TelemetryStore;

/// Samples retained per plant unless configured otherwise.
pub const RETENTION_LIMIT: usize = 1000;
