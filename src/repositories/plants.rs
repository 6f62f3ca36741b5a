use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::storage::{self, SharedStore};

const PLANTS_KEY: &str = "plants";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Rated capacity, kW
    pub capacity: f64,
    #[serde(default)]
    pub inverters: u32,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl Plant {
    fn default_plant() -> Self {
        Self {
            id: "plant1".to_string(),
            name: "Plant 1".to_string(),
            location: "Chennai, India".to_string(),
            capacity: 500.0,
            inverters: 3,
            latitude: "13.0827".to_string(),
            longitude: "80.2707".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlantCreate {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub capacity: f64,
    #[serde(default)]
    pub inverters: u32,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<f64>,
    pub inverters: Option<u32>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Plant records, kept together in one document.
pub struct PlantsRepository {
    store: SharedStore,
    write_lock: Mutex<()>,
}

impl PlantsRepository {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Plant>> {
        Ok(storage::load(self.store.as_ref(), PLANTS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, plants: &[Plant]) -> Result<()> {
        storage::save(self.store.as_ref(), PLANTS_KEY, &plants).await
    }

    /// Get all plants, seeding the default plant if there are none
    pub async fn get_all(&self) -> Result<Vec<Plant>> {
        let _guard = self.write_lock.lock().await;
        let mut plants = self.load().await?;

        if plants.is_empty() {
            tracing::info!("No plants registered, creating default plant");
            plants.push(Plant::default_plant());
            self.save(&plants).await?;
        }

        Ok(plants)
    }

    /// Get a plant by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Plant> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))
    }

    /// Register a new plant
    pub async fn create(&self, create: &PlantCreate) -> Result<Plant> {
        validate_name(&create.name)?;
        validate_capacity(create.capacity)?;

        let _guard = self.write_lock.lock().await;
        let mut plants = self.load().await?;

        let mut id = Utc::now().timestamp_millis();
        while plants.iter().any(|p| p.id == id.to_string()) {
            id += 1;
        }

        let plant = Plant {
            id: id.to_string(),
            name: create.name.trim().to_string(),
            location: create.location.clone(),
            capacity: create.capacity,
            inverters: create.inverters,
            latitude: create.latitude.clone(),
            longitude: create.longitude.clone(),
        };

        plants.push(plant.clone());
        self.save(&plants).await?;

        tracing::info!(plant_id = %plant.id, name = %plant.name, "Plant created");
        Ok(plant)
    }

    /// Merge the provided fields into an existing plant
    pub async fn update(&self, id: &str, update: &PlantUpdate) -> Result<Plant> {
        if let Some(ref name) = update.name {
            validate_name(name)?;
        }
        if let Some(capacity) = update.capacity {
            validate_capacity(capacity)?;
        }

        let _guard = self.write_lock.lock().await;
        let mut plants = self.load().await?;

        let plant = plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;

        if let Some(ref name) = update.name {
            plant.name = name.trim().to_string();
        }
        if let Some(ref location) = update.location {
            plant.location = location.clone();
        }
        if let Some(capacity) = update.capacity {
            plant.capacity = capacity;
        }
        if let Some(inverters) = update.inverters {
            plant.inverters = inverters;
        }
        if let Some(ref latitude) = update.latitude {
            plant.latitude = latitude.clone();
        }
        if let Some(ref longitude) = update.longitude {
            plant.longitude = longitude.clone();
        }

        let updated = plant.clone();
        self.save(&plants).await?;

        Ok(updated)
    }

    /// Remove a plant. Its telemetry history is left in place.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut plants = self.load().await?;

        let before = plants.len();
        plants.retain(|p| p.id != id);
        if plants.len() == before {
            return Err(AppError::NotFound(format!("Plant {} not found", id)));
        }

        self.save(&plants).await?;
        tracing::info!(plant_id = %id, "Plant deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: f64) -> Result<()> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(AppError::InvalidArgument(
            "capacity must be a positive number".to_string(),
        ));
    }
    Ok(())
}
