//! Resource state recomputation.
//!
//! Pure time-proportional decay: given a dimension's last observed state
//! and a timestamp, produce the current state. The function never mutates
//! shared state and is referentially transparent -- identical inputs give
//! identical outputs, which is what makes concurrent or duplicate
//! recomputation safe. The caller decides whether to commit the result.

use chrono::{DateTime, Utc};

use super::profile::DecayProfile;
use crate::plant::ResourceDimension;

/// Result of recomputing one dimension.
#[derive(Debug, Clone, Copy)]
pub struct Recomputed {
    /// Candidate new state, anchored at `now`. Only becomes real when
    /// the caller commits it.
    pub dimension: ResourceDimension,
    /// Level before recomputation, for edge-crossing checks.
    pub previous_pct: u8,
    /// Present when `now` preceded the last observation; elapsed time
    /// was clamped to zero and no decay applied.
    pub clock_skew_ms: Option<i64>,
}

/// Recompute the current level of one dimension at `now`.
///
/// Decay is expressed in capacity units per day and applied fractionally
/// per elapsed hour, rounded to the nearest whole unit to match the
/// granularity of the capacity table. The resulting percentage is
/// clamped to 0..=100.
pub fn recompute(
    dimension: &ResourceDimension,
    profile: &DecayProfile,
    now: DateTime<Utc>,
) -> Recomputed {
    let raw_ms = (now - dimension.last_observed_at).num_milliseconds();
    let clock_skew_ms = if raw_ms < 0 { Some(-raw_ms) } else { None };
    let elapsed_hours = raw_ms.max(0) as f64 / 3_600_000.0;

    let capacity = f64::from(profile.capacity_units);
    let current_absolute = f64::from(dimension.level_pct) * capacity / 100.0;
    let decay_units = (elapsed_hours * profile.decay_rate_per_day / 24.0).round();
    let new_pct = ((current_absolute - decay_units) / capacity * 100.0).round();

    Recomputed {
        dimension: ResourceDimension {
            level_pct: new_pct.clamp(0.0, 100.0) as u8,
            last_observed_at: now,
            ..*dimension
        },
        previous_pct: dimension.level_pct,
        clock_skew_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::{NeedTier, ResourceKind};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn water_dim(level_pct: u8) -> ResourceDimension {
        ResourceDimension {
            kind: ResourceKind::Water,
            need_tier: NeedTier::High,
            level_pct,
            last_observed_at: anchor(),
        }
    }

    #[test]
    fn medium_pot_full_day_scenario() {
        // capacity=9, rate=3/day, level 100%, 24h elapsed:
        // decay = round(24*3/24) = 3, absolute 9 -> 6, pct = round(6/9*100) = 67
        let profile = DecayProfile {
            capacity_units: 9,
            decay_rate_per_day: 3.0,
        };
        let out = recompute(&water_dim(100), &profile, anchor() + Duration::hours(24));
        assert_eq!(out.dimension.level_pct, 67);
        assert_eq!(out.previous_pct, 100);
        assert!(out.clock_skew_ms.is_none());
    }

    #[test]
    fn zero_elapsed_is_a_no_op() {
        let profile = DecayProfile {
            capacity_units: 9,
            decay_rate_per_day: 3.0,
        };
        let out = recompute(&water_dim(67), &profile, anchor());
        assert_eq!(out.dimension.level_pct, 67);
    }

    #[test]
    fn decay_clamps_to_zero() {
        let profile = DecayProfile {
            capacity_units: 4,
            decay_rate_per_day: 3.0,
        };
        // Two weeks would decay 42 units against a capacity of 4.
        let out = recompute(&water_dim(80), &profile, anchor() + Duration::days(14));
        assert_eq!(out.dimension.level_pct, 0);
    }

    #[test]
    fn clock_skew_clamps_elapsed_and_flags() {
        let profile = DecayProfile {
            capacity_units: 9,
            decay_rate_per_day: 3.0,
        };
        let out = recompute(&water_dim(55), &profile, anchor() - Duration::hours(2));
        assert_eq!(out.dimension.level_pct, 55);
        assert_eq!(out.clock_skew_ms, Some(2 * 3_600_000));
    }

    #[test]
    fn input_dimension_is_untouched() {
        let dim = water_dim(90);
        let profile = DecayProfile {
            capacity_units: 9,
            decay_rate_per_day: 3.0,
        };
        let _ = recompute(&dim, &profile, anchor() + Duration::hours(48));
        assert_eq!(dim.level_pct, 90);
        assert_eq!(dim.last_observed_at, anchor());
    }

    proptest! {
        #[test]
        fn recompute_is_idempotent(
            level in 0u8..=100,
            capacity in 1u32..=25,
            rate in 0.0f64..10.0,
            hours in 0i64..24 * 30,
        ) {
            let dim = water_dim(level);
            let profile = DecayProfile { capacity_units: capacity, decay_rate_per_day: rate };
            let now = anchor() + Duration::hours(hours);
            let a = recompute(&dim, &profile, now);
            let b = recompute(&dim, &profile, now);
            prop_assert_eq!(a.dimension, b.dimension);
            prop_assert_eq!(a.previous_pct, b.previous_pct);
            prop_assert_eq!(a.clock_skew_ms, b.clock_skew_ms);
        }

        #[test]
        fn decay_is_monotonically_non_increasing(
            level in 0u8..=100,
            capacity in 1u32..=25,
            rate in 0.0f64..10.0,
            h1 in 0i64..24 * 30,
            h2 in 0i64..24 * 30,
        ) {
            let (earlier, later) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
            let dim = water_dim(level);
            let profile = DecayProfile { capacity_units: capacity, decay_rate_per_day: rate };
            let at_earlier = recompute(&dim, &profile, anchor() + Duration::hours(earlier));
            let at_later = recompute(&dim, &profile, anchor() + Duration::hours(later));
            prop_assert!(at_later.dimension.level_pct <= at_earlier.dimension.level_pct);
        }

        #[test]
        fn level_always_within_bounds(
            level in 0u8..=100,
            capacity in 1u32..=25,
            rate in 0.0f64..50.0,
            hours in -24i64..24 * 365,
        ) {
            let dim = water_dim(level);
            let profile = DecayProfile { capacity_units: capacity, decay_rate_per_day: rate };
            let out = recompute(&dim, &profile, anchor() + Duration::hours(hours));
            prop_assert!(out.dimension.level_pct <= 100);
        }
    }
}
