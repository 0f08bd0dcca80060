//! Plant records and classification data.
//!
//! The [`Plant`] aggregate owns the tracked resource dimensions plus a
//! derived condition. It carries a revision counter for optimistic
//! concurrency: the store rejects a write whose revision no longer
//! matches the persisted row.

pub mod catalog;
mod condition;
mod dimension;

pub use catalog::{CareLevel, Species};
pub use condition::{ClassificationPolicy, Condition, ConditionBand};
pub use dimension::{ContainerSize, NeedTier, ResourceDimension, ResourceKind};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum nickname length, in characters.
pub const MAX_NICKNAME_CHARS: usize = 30;

/// Where the plant lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Indoor,
    Outdoor,
    Balcony,
    Patio,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Indoor => "indoor",
            Location::Outdoor => "outdoor",
            Location::Balcony => "balcony",
            Location::Patio => "patio",
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::Indoor
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indoor" => Ok(Location::Indoor),
            "outdoor" => Ok(Location::Outdoor),
            "balcony" => Ok(Location::Balcony),
            "patio" => Ok(Location::Patio),
            other => Err(format!("unknown location: {other}")),
        }
    }
}

/// A tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: Uuid,
    /// Owning user id. Opaque to the care engine.
    pub owner: String,
    pub nickname: String,
    pub species_id: String,
    pub location: Location,
    pub container: ContainerSize,
    pub condition: Condition,
    pub dimensions: Vec<ResourceDimension>,
    /// Bumped by the store on every committed write.
    pub revision: u64,
    pub created_at: DateTime<Utc>,
}

impl Plant {
    /// Adopt a new plant of the given species. Every dimension starts
    /// fully replenished and the condition is derived from the policy.
    pub fn adopt(
        owner: impl Into<String>,
        nickname: &str,
        species: &Species,
        location: Location,
        container: ContainerSize,
        policy: &ClassificationPolicy,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let nickname = validate_nickname(nickname)?;
        let dimensions = ResourceKind::ALL
            .iter()
            .map(|&kind| ResourceDimension::new(kind, species.needs(kind), now))
            .collect();
        Ok(Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            nickname,
            species_id: species.id.to_string(),
            location,
            container,
            condition: policy.classify(100),
            dimensions,
            revision: 0,
            created_at: now,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn dimension(&self, kind: ResourceKind) -> Option<&ResourceDimension> {
        self.dimensions.iter().find(|d| d.kind == kind)
    }

    /// Level of the dimension that drives classification: water when
    /// tracked, otherwise the lowest level of any dimension.
    pub fn primary_level(&self) -> Option<u8> {
        if let Some(water) = self.dimension(ResourceKind::Water) {
            return Some(water.level_pct);
        }
        self.dimensions.iter().map(|d| d.level_pct).min()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a care action to one dimension. Returns the level before
    /// the reset.
    pub fn replenish(
        &mut self,
        kind: ResourceKind,
        now: DateTime<Utc>,
    ) -> Result<u8, ValidationError> {
        let dim = self
            .dimensions
            .iter_mut()
            .find(|d| d.kind == kind)
            .ok_or(ValidationError::MissingDimension { kind })?;
        let previous = dim.level_pct;
        *dim = dim.replenished(now);
        Ok(previous)
    }
}

/// Trim and length-check a nickname.
pub fn validate_nickname(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyNickname);
    }
    let len = trimmed.chars().count();
    if len > MAX_NICKNAME_CHARS {
        return Err(ValidationError::NicknameTooLong {
            len,
            max: MAX_NICKNAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn adopt_fern(nickname: &str) -> Result<Plant, ValidationError> {
        Plant::adopt(
            "user-1",
            nickname,
            catalog::find("fern").unwrap(),
            Location::Indoor,
            ContainerSize::Medium,
            &ClassificationPolicy::default(),
            now(),
        )
    }

    #[test]
    fn adopted_plant_starts_full_and_thriving() {
        let plant = adopt_fern("Franklin").unwrap();
        assert_eq!(plant.dimensions.len(), 4);
        assert!(plant.dimensions.iter().all(|d| d.level_pct == 100));
        assert_eq!(plant.condition, Condition::Thriving);
        assert_eq!(plant.revision, 0);
        // Fern water needs are high; the seeded tier must follow the catalog.
        assert_eq!(
            plant.dimension(ResourceKind::Water).unwrap().need_tier,
            NeedTier::High
        );
    }

    #[test]
    fn nickname_is_trimmed() {
        let plant = adopt_fern("  Franklin  ").unwrap();
        assert_eq!(plant.nickname, "Franklin");
    }

    #[test]
    fn empty_nickname_rejected() {
        assert!(matches!(
            adopt_fern("   "),
            Err(ValidationError::EmptyNickname)
        ));
    }

    #[test]
    fn overlong_nickname_rejected() {
        let long = "f".repeat(MAX_NICKNAME_CHARS + 1);
        assert!(matches!(
            adopt_fern(&long),
            Err(ValidationError::NicknameTooLong { .. })
        ));
    }

    #[test]
    fn replenish_resets_one_dimension() {
        let mut plant = adopt_fern("Franklin").unwrap();
        for dim in &mut plant.dimensions {
            dim.level_pct = 30;
        }
        let later = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        let previous = plant.replenish(ResourceKind::Water, later).unwrap();
        assert_eq!(previous, 30);

        let water = plant.dimension(ResourceKind::Water).unwrap();
        assert_eq!(water.level_pct, 100);
        assert_eq!(water.last_observed_at, later);
        // Other dimensions untouched.
        assert_eq!(plant.dimension(ResourceKind::Light).unwrap().level_pct, 30);
    }

    #[test]
    fn primary_level_prefers_water() {
        let mut plant = adopt_fern("Franklin").unwrap();
        plant.replenish(ResourceKind::Water, now()).unwrap();
        for dim in &mut plant.dimensions {
            if dim.kind != ResourceKind::Water {
                dim.level_pct = 10;
            }
        }
        assert_eq!(plant.primary_level(), Some(100));
    }

    #[test]
    fn primary_level_falls_back_to_minimum() {
        let mut plant = adopt_fern("Franklin").unwrap();
        plant.dimensions.retain(|d| d.kind != ResourceKind::Water);
        plant.dimensions[0].level_pct = 55;
        plant.dimensions[1].level_pct = 15;
        assert_eq!(plant.primary_level(), Some(15));
    }
}
