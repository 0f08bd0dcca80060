//! Threshold notification dispatch.
//!
//! The dispatcher only decides *whether* a notification is due; delivery
//! belongs to the [`crate::notify::Notifier`] collaborator. The decision
//! is edge-triggered: a request is produced exactly when a level falls
//! from at-or-above the threshold to below it, so a level that stays
//! below threshold across many recomputations alerts once per crossing
//! episode, not once per call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plant::{Plant, ResourceKind};

/// When to raise an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// Levels below this are alert-worthy ("needs watering" semantics).
    #[serde(default = "default_threshold_pct")]
    pub threshold_pct: u8,
    /// Whether a plant observed for the first time with a level already
    /// below threshold alerts immediately. Off by default so an initial
    /// load cannot produce a notification storm.
    #[serde(default)]
    pub alert_on_first_observation: bool,
}

fn default_threshold_pct() -> u8 {
    40
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold_pct: default_threshold_pct(),
            alert_on_first_observation: false,
        }
    }
}

/// A notification the engine wants delivered. Rendering the message is
/// the only formatting this core does; channel, retry and delivery
/// policy belong to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub plant_id: Uuid,
    pub nickname: String,
    pub kind: ResourceKind,
    pub level_pct: u8,
    pub threshold_pct: u8,
    pub at: DateTime<Utc>,
}

impl NotificationRequest {
    /// Human-readable alert text.
    pub fn message(&self) -> String {
        match self.kind {
            ResourceKind::Water => format!("{} is in need of watering!", self.nickname),
            ResourceKind::Light => format!("{} needs more light!", self.nickname),
            ResourceKind::Fertilizer => {
                format!("{} is running low on fertilizer!", self.nickname)
            }
            ResourceKind::Temperature => {
                format!("{} needs a temperature check!", self.nickname)
            }
        }
    }
}

impl AlertPolicy {
    /// Decide whether the transition `previous_pct -> new_pct` warrants
    /// a notification. `previous_pct` is `None` on the very first
    /// observation of a dimension.
    pub fn check(
        &self,
        plant: &Plant,
        kind: ResourceKind,
        previous_pct: Option<u8>,
        new_pct: u8,
        at: DateTime<Utc>,
    ) -> Option<NotificationRequest> {
        let crossed = match previous_pct {
            Some(previous) => previous >= self.threshold_pct && new_pct < self.threshold_pct,
            None => self.alert_on_first_observation && new_pct < self.threshold_pct,
        };
        if !crossed {
            return None;
        }
        Some(NotificationRequest {
            plant_id: plant.id,
            nickname: plant.nickname.clone(),
            kind,
            level_pct: new_pct,
            threshold_pct: self.threshold_pct,
            at,
        })
    }
}
