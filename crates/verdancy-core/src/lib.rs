//! # Verdancy Core Library
//!
//! This library provides the core business logic for Verdancy, a
//! plant-care tracker. It implements the resource-depletion and
//! condition-classification engine: each plant owns a set of decaying
//! resource dimensions (water, light, fertilizer, temperature) whose
//! levels are recomputed from wall-clock time, reclassified against
//! threshold bands, and alerted on downward threshold crossings.
//!
//! ## Architecture
//!
//! - **Care Engine**: explicit read-modify-write cycles with optimistic
//!   concurrency -- recomputation is never a hidden side effect of a
//!   read, and a stale commit is retried from a fresh read
//! - **Recomputation**: pure wall-clock decay functions; the caller
//!   decides when to commit
//! - **Storage**: SQLite-based plant records and TOML-based
//!   configuration tables
//! - **Notifications**: edge-triggered alert decisions in the core,
//!   delivery delegated to a pluggable collaborator
//!
//! ## Key Components
//!
//! - [`CareEngine`]: reclassify / apply-care / sweep pipeline
//! - [`recompute`]: time-proportional resource decay
//! - [`ClassificationPolicy`]: table-driven condition bands
//! - [`Database`]: plant persistence with revision checks
//! - [`Notifier`]: trait for alert delivery collaborators

pub mod care;
pub mod error;
pub mod events;
pub mod notify;
pub mod plant;
pub mod storage;

pub use care::{
    recompute, resolve_profile, AlertPolicy, CapacityTable, CareEngine, CareOutcome,
    DecayProfile, DecayRates, NotificationOutcome, NotificationRequest, Recomputed, SweepReport,
    SweepResult, SweepStatus, TierRates,
};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use notify::{Notifier, NullNotifier};
pub use plant::{
    CareLevel, ClassificationPolicy, Condition, ConditionBand, ContainerSize, Location, NeedTier,
    Plant, ResourceDimension, ResourceKind, Species,
};
pub use storage::{CareConfig, Database, PlantStore};
