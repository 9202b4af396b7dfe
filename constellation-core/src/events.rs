//! Diagnostic events and the sinks that receive them.
//!
//! The core never formats or prints anything itself. State-changing operations
//! describe what happened as an [`OpsEvent`] and hand it to a [`Reporter`];
//! whether that ends up in a log, on a console or nowhere is up to the caller.

use std::cell::RefCell;

use serde::Serialize;

use crate::models::{ActivationOutcome, MissionOutcome, SatelliteType};

/// Something observable that happened during operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OpsEvent {
    SatelliteCreated {
        satellite: String,
        kind: SatelliteType,
        charge: f64,
    },
    ActivationAttempted {
        satellite: String,
        outcome: ActivationOutcome,
    },
    MissionAttempted {
        satellite: String,
        outcome: MissionOutcome,
    },
    ConstellationSaved {
        constellation: String,
    },
    /// A constellation with this name already exists; the original was kept.
    ConstellationDuplicate {
        constellation: String,
    },
    ConstellationRemoved {
        constellation: String,
    },
    ConstellationNotFound {
        constellation: String,
    },
    SatelliteAttached {
        constellation: String,
        satellite: String,
    },
    SatelliteDetached {
        constellation: String,
        satellite: String,
    },
    /// A bulk operation was requested on a constellation with no members.
    EmptyConstellation {
        constellation: String,
    },
    /// A blank constellation name was rejected before reaching the store.
    InvalidName {
        name: String,
    },
}

/// Fire-and-forget receiver for [`OpsEvent`]s.
pub trait Reporter {
    fn report(&self, event: &OpsEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &OpsEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &OpsEvent) {
        match event {
            OpsEvent::SatelliteCreated {
                satellite,
                kind,
                charge,
            } => tracing::info!(
                satellite = %satellite,
                kind = kind.as_str(),
                charge = *charge,
                "Satellite created"
            ),
            OpsEvent::ActivationAttempted { satellite, outcome } => match outcome {
                ActivationOutcome::Activated => {
                    tracing::info!(satellite = %satellite, "Satellite activated")
                }
                ActivationOutcome::AlreadyActive => {
                    tracing::debug!(satellite = %satellite, "Satellite already active")
                }
                ActivationOutcome::Denied { charge } => tracing::warn!(
                    satellite = %satellite,
                    charge = *charge,
                    "Activation denied, insufficient charge"
                ),
            },
            OpsEvent::MissionAttempted { satellite, outcome } => match outcome {
                MissionOutcome::Executed(report) => tracing::info!(
                    satellite = %satellite,
                    charge = report.charge,
                    deactivated = report.deactivated,
                    "Mission executed"
                ),
                MissionOutcome::Skipped => {
                    tracing::debug!(satellite = %satellite, "Mission skipped, satellite inactive")
                }
            },
            OpsEvent::ConstellationSaved { constellation } => {
                tracing::info!(constellation = %constellation, "Constellation saved")
            }
            OpsEvent::ConstellationDuplicate { constellation } => tracing::warn!(
                constellation = %constellation,
                "Constellation already exists, keeping original"
            ),
            OpsEvent::ConstellationRemoved { constellation } => {
                tracing::info!(constellation = %constellation, "Constellation removed")
            }
            OpsEvent::ConstellationNotFound { constellation } => {
                tracing::warn!(constellation = %constellation, "Constellation not found")
            }
            OpsEvent::SatelliteAttached {
                constellation,
                satellite,
            } => tracing::info!(
                constellation = %constellation,
                satellite = %satellite,
                "Satellite attached"
            ),
            OpsEvent::SatelliteDetached {
                constellation,
                satellite,
            } => tracing::info!(
                constellation = %constellation,
                satellite = %satellite,
                "Satellite detached"
            ),
            OpsEvent::EmptyConstellation { constellation } => {
                tracing::warn!(constellation = %constellation, "Constellation has no satellites")
            }
            OpsEvent::InvalidName { name } => {
                tracing::warn!(name = ?name, "Invalid constellation name")
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<OpsEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<OpsEvent> {
        self.events.borrow().clone()
    }

    /// Drain and return the events received so far.
    pub fn take(&self) -> Vec<OpsEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &OpsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
