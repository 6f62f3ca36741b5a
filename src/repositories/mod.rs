pub mod alerts;
pub mod plants;

pub use alerts::{Alert, AlertsRepository, Severity};
pub use plants::{Plant, PlantCreate, PlantUpdate, PlantsRepository};
