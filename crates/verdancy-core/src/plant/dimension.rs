use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked, decaying quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Water,
    Light,
    Fertilizer,
    Temperature,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Water,
        ResourceKind::Light,
        ResourceKind::Fertilizer,
        ResourceKind::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Water => "water",
            ResourceKind::Light => "light",
            ResourceKind::Fertilizer => "fertilizer",
            ResourceKind::Temperature => "temperature",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative consumption rate classifier. Drives the decay rate of a
/// dimension through the configured rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedTier {
    Low,
    Medium,
    High,
}

impl NeedTier {
    pub fn as_str(self) -> &'static str {
        match self {
            NeedTier::Low => "low",
            NeedTier::Medium => "medium",
            NeedTier::High => "high",
        }
    }
}

impl fmt::Display for NeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pot size. Maps to capacity units through the configured capacity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSize {
    Xsmall,
    Small,
    Medium,
    Large,
    Xlarge,
}

impl ContainerSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerSize::Xsmall => "xsmall",
            ContainerSize::Small => "small",
            ContainerSize::Medium => "medium",
            ContainerSize::Large => "large",
            ContainerSize::Xlarge => "xlarge",
        }
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xsmall" => Ok(ContainerSize::Xsmall),
            "small" => Ok(ContainerSize::Small),
            "medium" => Ok(ContainerSize::Medium),
            "large" => Ok(ContainerSize::Large),
            "xlarge" => Ok(ContainerSize::Xlarge),
            other => Err(format!("unknown container size: {other}")),
        }
    }
}

/// One tracked resource of a plant.
///
/// `level_pct` is the normalized level as a percentage of capacity and
/// stays within 0..=100. Between replenishments it only ever decreases.
/// `last_observed_at` anchors the decay computation; it advances only
/// when a recomputed state is committed or the dimension is replenished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDimension {
    pub kind: ResourceKind,
    pub need_tier: NeedTier,
    pub level_pct: u8,
    pub last_observed_at: DateTime<Utc>,
}

impl ResourceDimension {
    /// A freshly cared-for dimension: full level, observed now.
    pub fn new(kind: ResourceKind, need_tier: NeedTier, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            need_tier,
            level_pct: 100,
            last_observed_at: now,
        }
    }

    /// Apply a care action: reset to capacity and re-anchor the
    /// observation timestamp. The only operation that raises a level.
    pub fn replenished(&self, now: DateTime<Utc>) -> Self {
        Self {
            level_pct: 100,
            last_observed_at: now,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_dimension_starts_full() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let dim = ResourceDimension::new(ResourceKind::Water, NeedTier::Medium, now);
        assert_eq!(dim.level_pct, 100);
        assert_eq!(dim.last_observed_at, now);
    }

    #[test]
    fn replenished_resets_level_and_timestamp() {
        let planted = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut dim = ResourceDimension::new(ResourceKind::Water, NeedTier::High, planted);
        dim.level_pct = 12;

        let now = Utc.with_ymd_and_hms(2025, 6, 8, 9, 30, 0).unwrap();
        let fresh = dim.replenished(now);
        assert_eq!(fresh.level_pct, 100);
        assert_eq!(fresh.last_observed_at, now);
        assert_eq!(fresh.kind, ResourceKind::Water);
        assert_eq!(fresh.need_tier, NeedTier::High);
    }

    #[test]
    fn container_size_string_roundtrip() {
        for size in [
            ContainerSize::Xsmall,
            ContainerSize::Small,
            ContainerSize::Medium,
            ContainerSize::Large,
            ContainerSize::Xlarge,
        ] {
            assert_eq!(size.as_str().parse::<ContainerSize>().unwrap(), size);
        }
        assert!("gigantic".parse::<ContainerSize>().is_err());
    }
}
