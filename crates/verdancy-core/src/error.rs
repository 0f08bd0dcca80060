//! Core error types for verdancy-core.
//!
//! This module defines the error hierarchy using thiserror. The split
//! follows the failure taxonomy of the care pipeline: configuration
//! problems are fatal to a single operation and surface before any write,
//! store conflicts are recoverable via retry, and validation errors are
//! caller mistakes.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::plant::{ContainerSize, NeedTier, ResourceKind};

/// Core error type for verdancy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Persistence-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// No plant with the given id
    #[error("Plant {plant_id} not found")]
    NotFound { plant_id: Uuid },

    /// Concurrent write detected at commit time. The caller retries the
    /// full read-modify-write cycle from a fresh read.
    #[error("Concurrent write detected for plant {plant_id} (stale revision {revision})")]
    Conflict { plant_id: Uuid, revision: u64 },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// A decay rate below zero would make resources replenish themselves
    /// through the decay path instead of through an explicit care action.
    #[error("Negative decay rate {rate} configured for {kind}/{tier}")]
    NegativeDecayRate {
        kind: ResourceKind,
        tier: NeedTier,
        rate: f64,
    },

    /// A container with no capacity cannot serve as a decay denominator.
    #[error("Container size {container} has zero capacity units")]
    ZeroCapacity { container: ContainerSize },

    /// Classification bands are out of order or otherwise unusable.
    #[error("Malformed classification policy: {0}")]
    MalformedPolicy(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Nickname is empty after trimming
    #[error("Nickname must not be empty")]
    EmptyNickname,

    /// Nickname exceeds the allowed length
    #[error("Nickname is {len} characters, maximum is {max}")]
    NicknameTooLong { len: usize, max: usize },

    /// No species with the given id in the catalog
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// The plant does not track the requested resource
    #[error("Plant has no {kind} dimension")]
    MissingDimension { kind: ResourceKind },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
