//! TOML-based care configuration.
//!
//! Stores the tunable tables of the care pipeline:
//! - Capacity units per container size
//! - Decay rates per resource kind and need tier
//! - Alert threshold and first-observation behavior
//! - Classification bands
//! - Commit retry budget
//!
//! Configuration is stored at `~/.config/verdancy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::care::{AlertPolicy, CapacityTable, DecayRates};
use crate::error::ConfigError;
use crate::plant::ClassificationPolicy;

/// Care pipeline configuration.
///
/// Serialized to/from TOML at `~/.config/verdancy/config.toml`. Every
/// section has defaults matching the observed production tables, so a
/// missing or partial file always yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareConfig {
    #[serde(default)]
    pub capacity: CapacityTable,
    #[serde(default)]
    pub decay: DecayRates,
    #[serde(default)]
    pub alerts: AlertPolicy,
    #[serde(default)]
    pub classification: ClassificationPolicy,
    /// Read-modify-write attempts before a conflict surfaces.
    #[serde(default = "default_commit_attempts")]
    pub commit_attempts: u32,
}

fn default_commit_attempts() -> u32 {
    3
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityTable::default(),
            decay: DecayRates::default(),
            alerts: AlertPolicy::default(),
            classification: ClassificationPolicy::default(),
            commit_attempts: default_commit_attempts(),
        }
    }
}

impl CareConfig {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/verdancy"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/verdancy"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Check every table before the engine uses it: no zero capacities,
    /// no negative or non-finite decay rates, ordered classification
    /// bands, sane threshold and retry budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity.validate()?;
        self.decay.validate()?;
        self.classification.validate()?;
        if self.alerts.threshold_pct > 100 {
            return Err(ConfigError::InvalidValue {
                key: "alerts.threshold_pct".into(),
                message: format!("must be 0..=100, got {}", self.alerts.threshold_pct),
            });
        }
        if self.commit_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "commit_attempts".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
