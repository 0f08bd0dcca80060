//! Decay profile resolution.
//!
//! A decay profile pairs the capacity units of the plant's container with
//! the per-day decay rate of one resource dimension. Both halves are
//! configuration data: capacity comes from a table keyed by container
//! size, the rate from per-kind need-tier tables. Resolution validates
//! the looked-up values so a degenerate configuration fails before any
//! recomputation runs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::plant::{ContainerSize, NeedTier, ResourceKind};

/// Resolved decay parameters for one dimension of one plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayProfile {
    /// Abstract capacity derived from container size; the decay
    /// denominator when converting between absolute and normalized
    /// levels.
    pub capacity_units: u32,
    pub decay_rate_per_day: f64,
}

/// Capacity units per container size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
    #[serde(default = "default_xsmall")]
    pub xsmall: u32,
    #[serde(default = "default_small")]
    pub small: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default = "default_large")]
    pub large: u32,
    #[serde(default = "default_xlarge")]
    pub xlarge: u32,
}

fn default_xsmall() -> u32 {
    1
}
fn default_small() -> u32 {
    4
}
fn default_medium() -> u32 {
    9
}
fn default_large() -> u32 {
    15
}
fn default_xlarge() -> u32 {
    25
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            xsmall: default_xsmall(),
            small: default_small(),
            medium: default_medium(),
            large: default_large(),
            xlarge: default_xlarge(),
        }
    }
}

impl CapacityTable {
    pub fn units_for(&self, container: ContainerSize) -> u32 {
        match container {
            ContainerSize::Xsmall => self.xsmall,
            ContainerSize::Small => self.small,
            ContainerSize::Medium => self.medium,
            ContainerSize::Large => self.large,
            ContainerSize::Xlarge => self.xlarge,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for container in [
            ContainerSize::Xsmall,
            ContainerSize::Small,
            ContainerSize::Medium,
            ContainerSize::Large,
            ContainerSize::Xlarge,
        ] {
            if self.units_for(container) == 0 {
                return Err(ConfigError::ZeroCapacity { container });
            }
        }
        Ok(())
    }
}

/// Decay rate (capacity units per day) for each need tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl TierRates {
    const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    pub fn rate_for(&self, tier: NeedTier) -> f64 {
        match tier {
            NeedTier::Low => self.low,
            NeedTier::Medium => self.medium,
            NeedTier::High => self.high,
        }
    }

    fn validate(&self, kind: ResourceKind) -> Result<(), ConfigError> {
        for tier in [NeedTier::Low, NeedTier::Medium, NeedTier::High] {
            let rate = self.rate_for(tier);
            if !rate.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: format!("decay.{kind}.{tier}"),
                    message: format!("rate must be finite, got {rate}"),
                });
            }
            if rate < 0.0 {
                return Err(ConfigError::NegativeDecayRate { kind, tier, rate });
            }
        }
        Ok(())
    }
}

/// Per-kind decay rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRates {
    #[serde(default = "default_water_rates")]
    pub water: TierRates,
    #[serde(default = "default_light_rates")]
    pub light: TierRates,
    #[serde(default = "default_fertilizer_rates")]
    pub fertilizer: TierRates,
    #[serde(default = "default_temperature_rates")]
    pub temperature: TierRates,
}

fn default_water_rates() -> TierRates {
    TierRates::new(1.0, 2.0, 3.0)
}
fn default_light_rates() -> TierRates {
    TierRates::new(2.0, 3.0, 5.0)
}
fn default_fertilizer_rates() -> TierRates {
    TierRates::new(0.5, 1.0, 2.0)
}
fn default_temperature_rates() -> TierRates {
    TierRates::new(1.0, 2.0, 3.0)
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            water: default_water_rates(),
            light: default_light_rates(),
            fertilizer: default_fertilizer_rates(),
            temperature: default_temperature_rates(),
        }
    }
}

impl DecayRates {
    pub fn rates_for(&self, kind: ResourceKind) -> &TierRates {
        match kind {
            ResourceKind::Water => &self.water,
            ResourceKind::Light => &self.light,
            ResourceKind::Fertilizer => &self.fertilizer,
            ResourceKind::Temperature => &self.temperature,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ResourceKind::ALL {
            self.rates_for(kind).validate(kind)?;
        }
        Ok(())
    }
}

/// Resolve the decay profile for one dimension of one plant.
pub fn resolve_profile(
    capacities: &CapacityTable,
    rates: &DecayRates,
    container: ContainerSize,
    kind: ResourceKind,
    tier: NeedTier,
) -> Result<DecayProfile, ConfigError> {
    let capacity_units = capacities.units_for(container);
    if capacity_units == 0 {
        return Err(ConfigError::ZeroCapacity { container });
    }
    let decay_rate_per_day = rates.rates_for(kind).rate_for(tier);
    if !decay_rate_per_day.is_finite() {
        return Err(ConfigError::InvalidValue {
            key: format!("decay.{kind}.{tier}"),
            message: format!("rate must be finite, got {decay_rate_per_day}"),
        });
    }
    if decay_rate_per_day < 0.0 {
        return Err(ConfigError::NegativeDecayRate {
            kind,
            tier,
            rate: decay_rate_per_day,
        });
    }
    Ok(DecayProfile {
        capacity_units,
        decay_rate_per_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_table_matches_pot_sizes() {
        let table = CapacityTable::default();
        assert_eq!(table.units_for(ContainerSize::Xsmall), 1);
        assert_eq!(table.units_for(ContainerSize::Small), 4);
        assert_eq!(table.units_for(ContainerSize::Medium), 9);
        assert_eq!(table.units_for(ContainerSize::Large), 15);
        assert_eq!(table.units_for(ContainerSize::Xlarge), 25);
    }

    #[test]
    fn resolve_medium_high_water() {
        let profile = resolve_profile(
            &CapacityTable::default(),
            &DecayRates::default(),
            ContainerSize::Medium,
            ResourceKind::Water,
            NeedTier::High,
        )
        .unwrap();
        assert_eq!(profile.capacity_units, 9);
        assert_eq!(profile.decay_rate_per_day, 3.0);
    }

    #[test]
    fn negative_rate_rejected() {
        let mut rates = DecayRates::default();
        rates.water.medium = -1.0;
        let err = resolve_profile(
            &CapacityTable::default(),
            &rates,
            ContainerSize::Small,
            ResourceKind::Water,
            NeedTier::Medium,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NegativeDecayRate { .. }));
        assert!(rates.validate().is_err());
    }

    #[test]
    fn zero_capacity_rejected() {
        let table = CapacityTable {
            small: 0,
            ..CapacityTable::default()
        };
        assert!(matches!(
            table.validate(),
            Err(ConfigError::ZeroCapacity {
                container: ContainerSize::Small
            })
        ));
        let err = resolve_profile(
            &table,
            &DecayRates::default(),
            ContainerSize::Small,
            ResourceKind::Light,
            NeedTier::Low,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity { .. }));
    }

    #[test]
    fn non_finite_rate_rejected() {
        let mut rates = DecayRates::default();
        rates.fertilizer.high = f64::NAN;
        assert!(matches!(
            rates.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
