//! Condition classification.
//!
//! The classifier is a pure function from a normalized resource level to
//! a discrete condition. Threshold bands are data, not code branches, so
//! they can be validated and reconfigured independently. No hysteresis is
//! applied: a level oscillating around a boundary reclassifies on every
//! recomputation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Discrete plant-health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Struggling,
    NeedsAttention,
    Healthy,
    Thriving,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Struggling => "struggling",
            Condition::NeedsAttention => "needsAttention",
            Condition::Healthy => "healthy",
            Condition::Thriving => "thriving",
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Healthy
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "struggling" => Ok(Condition::Struggling),
            "needsAttention" => Ok(Condition::NeedsAttention),
            "healthy" => Ok(Condition::Healthy),
            "thriving" => Ok(Condition::Thriving),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

/// One classification band: levels strictly below `upper_bound_pct` map
/// to `condition` (unless an earlier band already matched).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionBand {
    pub upper_bound_pct: u8,
    pub condition: Condition,
}

/// Ordered list of bands evaluated bottom-up, with `ceiling` as the
/// open-ended top band. Bounds must be strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    pub bands: Vec<ConditionBand>,
    pub ceiling: Condition,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            bands: vec![
                ConditionBand {
                    upper_bound_pct: 20,
                    condition: Condition::Struggling,
                },
                ConditionBand {
                    upper_bound_pct: 40,
                    condition: Condition::NeedsAttention,
                },
                ConditionBand {
                    upper_bound_pct: 80,
                    condition: Condition::Healthy,
                },
            ],
            ceiling: Condition::Thriving,
        }
    }
}

impl ClassificationPolicy {
    /// Map a normalized level to a condition. Total: every input yields a
    /// condition, levels at or above the last bound map to the ceiling.
    pub fn classify(&self, level_pct: u8) -> Condition {
        for band in &self.bands {
            if level_pct < band.upper_bound_pct {
                return band.condition;
            }
        }
        self.ceiling
    }

    /// Check the strictly-increasing-bounds invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pair in self.bands.windows(2) {
            if pair[0].upper_bound_pct >= pair[1].upper_bound_pct {
                return Err(ConfigError::MalformedPolicy(format!(
                    "band bounds must be strictly increasing, got {} then {}",
                    pair[0].upper_bound_pct, pair[1].upper_bound_pct
                )));
            }
        }
        if let Some(last) = self.bands.last() {
            if last.upper_bound_pct > 100 {
                return Err(ConfigError::MalformedPolicy(format!(
                    "band bound {} exceeds 100",
                    last.upper_bound_pct
                )));
            }
        }
        Ok(())
    }
}
