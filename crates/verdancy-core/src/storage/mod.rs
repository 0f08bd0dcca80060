mod config;
pub mod database;

pub use config::CareConfig;
pub use database::Database;

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::StoreError;
use crate::plant::Plant;

/// Persistence collaborator for plant records.
///
/// `save` enforces optimistic concurrency: the write is rejected with
/// [`StoreError::Conflict`] when the plant's revision no longer matches
/// the stored row, which is how two concurrent read-modify-write cycles
/// are prevented from both committing against the same base state.
pub trait PlantStore {
    /// Load one plant by id.
    fn load(&self, plant_id: Uuid) -> Result<Plant, StoreError>;

    /// Persist a freshly adopted plant.
    fn insert(&self, plant: &Plant) -> Result<(), StoreError>;

    /// Commit a modified plant. Returns the committed record with its
    /// revision bumped; fails with `Conflict` on a stale revision.
    fn save(&self, plant: &Plant) -> Result<Plant, StoreError>;

    /// Ids of all stored plants, oldest first.
    fn list_ids(&self) -> Result<Vec<Uuid>, StoreError>;
}

/// Returns `~/.config/verdancy[-dev]/` based on VERDANCY_ENV.
///
/// Set VERDANCY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VERDANCY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("verdancy-dev")
    } else {
        base_dir.join("verdancy")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
