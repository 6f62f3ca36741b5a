pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod storage;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, Result};
