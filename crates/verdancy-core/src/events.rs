use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plant::{Condition, ResourceKind};

/// Every observable state change in the care pipeline produces an Event.
/// Engine operations return the events they generated; callers poll or
/// forward them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A recomputation changed the plant's condition.
    ConditionChanged {
        plant_id: Uuid,
        from: Condition,
        to: Condition,
        at: DateTime<Utc>,
    },
    /// A resource level crossed below the alert threshold.
    AlertRaised {
        plant_id: Uuid,
        kind: ResourceKind,
        level_pct: u8,
        threshold_pct: u8,
        at: DateTime<Utc>,
    },
    /// A care action reset a resource to capacity.
    ResourceReplenished {
        plant_id: Uuid,
        kind: ResourceKind,
        previous_pct: u8,
        at: DateTime<Utc>,
    },
    /// `now` preceded the last observation; elapsed time was clamped to
    /// zero. Not a failure, but worth surfacing.
    ClockSkewObserved {
        plant_id: Uuid,
        kind: ResourceKind,
        skew_ms: i64,
        at: DateTime<Utc>,
    },
}
