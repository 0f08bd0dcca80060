//! Care engine.
//!
//! Owns the read -> recompute -> classify -> decide -> write cycle for a
//! plant. The cycle is one logical transaction: the store rejects a
//! commit against a stale revision, and the engine retries the whole
//! cycle from a fresh read up to a bounded attempt budget, so decay can
//! never be double-applied by concurrent callers.
//!
//! Recomputation is never embedded in a read path. The only entry points
//! are [`CareEngine::reclassify`] (explicit, scheduler- or UI-driven),
//! [`CareEngine::apply_care`] (care actions) and [`CareEngine::sweep`]
//! (batch reclassification with per-plant failure isolation).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::alert::NotificationRequest;
use super::profile::resolve_profile;
use super::recompute::recompute;
use crate::error::{ConfigError, Result, StoreError};
use crate::events::Event;
use crate::notify::Notifier;
use crate::plant::{Condition, Plant, ResourceKind};
use crate::storage::{CareConfig, PlantStore};

/// Result of one committed care cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareOutcome {
    /// The plant as committed (revision already bumped by the store).
    pub plant: Plant,
    pub events: Vec<Event>,
    /// Notifications decided by this cycle, dispatched after the commit.
    pub notifications: Vec<NotificationOutcome>,
    /// Read-modify-write attempts spent, including the successful one.
    pub attempts: u32,
}

/// Delivery result for one notification request. A failed delivery never
/// rolls back the committed plant state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub request: NotificationRequest,
    pub delivered: bool,
    pub failure: Option<String>,
}

/// Per-plant result of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SweepStatus {
    /// Cycle committed.
    Completed {
        condition: Condition,
        alerts: usize,
    },
    /// Cycle failed; the sweep carried on with the remaining plants.
    Failed {
        reason: String,
        retriable: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub plant_id: Uuid,
    pub status: SweepStatus,
}

/// Log of one batch reclassification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub swept_at: DateTime<Utc>,
    pub results: Vec<SweepResult>,
}

impl SweepReport {
    pub fn completed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, SweepStatus::Completed { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, SweepStatus::Failed { .. }))
            .count()
    }
}

/// The care engine. Generic over its two collaborators: the persistence
/// store and the notification delivery channel.
pub struct CareEngine<S, N> {
    store: S,
    notifier: N,
    config: CareConfig,
}

impl<S: PlantStore, N: Notifier> CareEngine<S, N> {
    /// Create an engine, validating the configuration up front so a
    /// degenerate capacity table, decay rate or classification policy
    /// fails here instead of mid-cycle.
    pub fn new(store: S, notifier: N, config: CareConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            notifier,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &CareConfig {
        &self.config
    }

    /// Recompute, reclassify and commit one plant at `now`.
    pub fn reclassify(&self, plant_id: Uuid, now: DateTime<Utc>) -> Result<CareOutcome> {
        self.run_cycle(plant_id, None, now)
    }

    /// Apply a care action to one dimension, then run the standard
    /// recompute -> classify -> notify -> commit pipeline.
    pub fn apply_care(
        &self,
        plant_id: Uuid,
        kind: ResourceKind,
        now: DateTime<Utc>,
    ) -> Result<CareOutcome> {
        self.run_cycle(plant_id, Some(kind), now)
    }

    /// Reclassify every stored plant. One plant's failure is recorded in
    /// the report and does not abort the rest of the batch.
    pub fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let ids = self.store.list_ids()?;
        let mut results = Vec::with_capacity(ids.len());
        for plant_id in ids {
            let status = match self.reclassify(plant_id, now) {
                Ok(outcome) => SweepStatus::Completed {
                    condition: outcome.plant.condition,
                    alerts: outcome.notifications.len(),
                },
                Err(err) => SweepStatus::Failed {
                    retriable: is_retriable(&err),
                    reason: err.to_string(),
                },
            };
            results.push(SweepResult { plant_id, status });
        }
        Ok(SweepReport {
            swept_at: now,
            results,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn run_cycle(
        &self,
        plant_id: Uuid,
        replenish: Option<ResourceKind>,
        now: DateTime<Utc>,
    ) -> Result<CareOutcome> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut plant = self.store.load(plant_id)?;
            let mut events = Vec::new();

            if let Some(kind) = replenish {
                let previous_pct = plant.replenish(kind, now)?;
                events.push(Event::ResourceReplenished {
                    plant_id,
                    kind,
                    previous_pct,
                    at: now,
                });
            }

            let mut requests = Vec::new();
            for i in 0..plant.dimensions.len() {
                let dim = plant.dimensions[i];
                let profile = resolve_profile(
                    &self.config.capacity,
                    &self.config.decay,
                    plant.container,
                    dim.kind,
                    dim.need_tier,
                )?;
                let out = recompute(&dim, &profile, now);
                if let Some(skew_ms) = out.clock_skew_ms {
                    events.push(Event::ClockSkewObserved {
                        plant_id,
                        kind: dim.kind,
                        skew_ms,
                        at: now,
                    });
                }
                if let Some(request) = self.config.alerts.check(
                    &plant,
                    dim.kind,
                    Some(out.previous_pct),
                    out.dimension.level_pct,
                    now,
                ) {
                    requests.push(request);
                }
                plant.dimensions[i] = out.dimension;
            }

            let previous_condition = plant.condition;
            if let Some(level) = plant.primary_level() {
                plant.condition = self.config.classification.classify(level);
            }
            if plant.condition != previous_condition {
                events.push(Event::ConditionChanged {
                    plant_id,
                    from: previous_condition,
                    to: plant.condition,
                    at: now,
                });
            }
            for request in &requests {
                events.push(Event::AlertRaised {
                    plant_id,
                    kind: request.kind,
                    level_pct: request.level_pct,
                    threshold_pct: request.threshold_pct,
                    at: now,
                });
            }

            match self.store.save(&plant) {
                Ok(committed) => {
                    let notifications = self.dispatch(requests);
                    return Ok(CareOutcome {
                        plant: committed,
                        events,
                        notifications,
                        attempts,
                    });
                }
                Err(StoreError::Conflict { plant_id, revision }) => {
                    if attempts >= self.config.commit_attempts {
                        return Err(StoreError::Conflict { plant_id, revision }.into());
                    }
                    // Retry the whole cycle from a fresh read.
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Deliver decided notifications. Runs only after a successful
    /// commit; delivery failures are absorbed into the outcome.
    fn dispatch(&self, requests: Vec<NotificationRequest>) -> Vec<NotificationOutcome> {
        requests
            .into_iter()
            .map(|request| match self.notifier.send(&request) {
                Ok(()) => NotificationOutcome {
                    request,
                    delivered: true,
                    failure: None,
                },
                Err(err) => NotificationOutcome {
                    request,
                    delivered: false,
                    failure: Some(err.to_string()),
                },
            })
            .collect()
    }
}

fn is_retriable(err: &crate::error::CoreError) -> bool {
    matches!(
        err,
        crate::error::CoreError::Store(StoreError::Conflict { .. })
            | crate::error::CoreError::Store(StoreError::Locked)
    )
}
