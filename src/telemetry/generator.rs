use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::Sample;
use crate::error::{AppError, Result};

/// Produces telemetry for a plant of a given rated capacity (kW).
///
/// The mock generator below is the only implementation today; a real
/// ingestion adapter would implement this trait and take its place.
pub trait SampleSource: Send + Sync {
    fn generate(&self, capacity: f64) -> Result<Sample>;
}

/// Random samples whose magnitudes scale with plant capacity.
pub struct SampleGenerator {
    rng: Mutex<StdRng>,
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate a sample stamped with `timestamp` instead of the current time.
    pub fn generate_at(&self, capacity: f64, timestamp: DateTime<Utc>) -> Result<Sample> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "capacity must be a positive number, got {}",
                capacity
            )));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal("sample generator lock poisoned".to_string()))?;

        let base = capacity / 5.0;

        Ok(Sample {
            ac_power: draw(&mut *rng, base * 0.3) + base,
            dc_power: draw(&mut *rng, base * 0.4) + base * 1.2,
            pr: draw(&mut *rng, 10.0) + 80.0,
            daily_yield: draw(&mut *rng, base * 2.0) + base * 4.0,
            soiling_index: draw(&mut *rng, 10.0) + 5.0,
            irradiance: draw(&mut *rng, 200.0) + 600.0,
            timestamp,
        })
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SampleGenerator {
    fn generate(&self, capacity: f64) -> Result<Sample> {
        self.generate_at(capacity, Utc::now())
    }
}

/// Uniform integer in [0, upper), floored.
fn draw<R: Rng + ?Sized>(rng: &mut R, upper: f64) -> f64 {
    (rng.gen::<f64>() * upper).floor()
}
