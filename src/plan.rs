//! Scripted flight plans.
//!
//! A plan declares the satellites to build and a list of steps to run against
//! an [`OperationsCenter`]. Plans are JSON documents:
//!
//! ```json
//! {
//!   "satellites": [
//!     { "id": "relay-a", "params": { "type": "relay", "throughput": 500.0 } }
//!   ],
//!   "steps": [
//!     { "op": "create_constellation", "name": "Orbit-1" },
//!     { "op": "attach", "constellation": "Orbit-1", "satellite": "relay-a" },
//!     { "op": "activate", "constellation": "Orbit-1" },
//!     { "op": "run_missions", "constellation": "Orbit-1", "repeat": 3 },
//!     { "op": "status", "constellation": "Orbit-1" }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use constellation_core::models::{
    ConstellationStatus, SatelliteFactory, SatelliteHandle, SatelliteParams,
};
use constellation_core::service::{Dispatch, OperationsCenter, Registration};
use constellation_core::OpsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid satellite '{alias}': {source}")]
    Satellite {
        alias: String,
        #[source]
        source: OpsError,
    },

    #[error("Unknown satellite alias '{0}'")]
    UnknownSatellite(String),

    #[error("Duplicate satellite alias '{0}'")]
    DuplicateSatellite(String),
}

/// A satellite declared by a plan, referenced from steps by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteEntry {
    pub id: String,
    pub params: SatelliteParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateConstellation {
        name: String,
    },
    RemoveConstellation {
        name: String,
    },
    Attach {
        constellation: String,
        satellite: String,
    },
    Detach {
        constellation: String,
        satellite: String,
    },
    Activate {
        constellation: String,
    },
    RunMissions {
        constellation: String,
        #[serde(default = "default_repeat")]
        repeat: u32,
    },
    Status {
        constellation: String,
    },
}

fn default_repeat() -> u32 {
    1
}

impl Step {
    /// Satellite alias the step refers to, if any.
    fn satellite_alias(&self) -> Option<&str> {
        match self {
            Self::Attach { satellite, .. } | Self::Detach { satellite, .. } => Some(satellite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    #[serde(default)]
    pub satellites: Vec<SatelliteEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// What running a plan produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanOutcome {
    /// One snapshot per `status` step, in plan order.
    pub snapshots: Vec<ConstellationStatus>,
    /// Steps that named a missing constellation, an invalid name or a
    /// duplicate registration. They are no-ops, not failures.
    pub missed_steps: usize,
}

impl FlightPlan {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse plan file")
    }

    /// The standard two-constellation demonstration run.
    pub fn demo() -> Self {
        const FIRST: &str = "Orbit-1";
        const SECOND: &str = "Orbit-2";

        let satellite = |id: &str, params| SatelliteEntry {
            id: id.to_string(),
            params,
        };
        let attach = |constellation: &str, satellite: &str| Step::Attach {
            constellation: constellation.to_string(),
            satellite: satellite.to_string(),
        };

        let mut steps = vec![
            Step::CreateConstellation {
                name: FIRST.to_string(),
            },
            Step::CreateConstellation {
                name: SECOND.to_string(),
            },
            attach(FIRST, "relay-a"),
            attach(SECOND, "relay-b"),
            attach(FIRST, "imager-a"),
            attach(SECOND, "imager-b"),
            attach(SECOND, "imager-c"),
        ];
        for name in [FIRST, SECOND] {
            steps.push(Step::Activate {
                constellation: name.to_string(),
            });
            steps.push(Step::RunMissions {
                constellation: name.to_string(),
                repeat: 1,
            });
            steps.push(Step::Status {
                constellation: name.to_string(),
            });
        }

        Self {
            satellites: vec![
                satellite("relay-a", SatelliteParams::relay(500.0)),
                satellite("relay-b", SatelliteParams::relay(1000.0)),
                satellite("imager-a", SatelliteParams::imaging(2.5)),
                satellite("imager-b", SatelliteParams::imaging(1.0)),
                satellite("imager-c", SatelliteParams::imaging(0.5)),
            ],
            steps,
        }
    }

    /// Check that aliases are unique and every step refers to a declared one.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut seen = HashSet::new();
        for entry in &self.satellites {
            if !seen.insert(entry.id.as_str()) {
                return Err(PlanError::DuplicateSatellite(entry.id.clone()));
            }
        }
        for alias in self.steps.iter().filter_map(Step::satellite_alias) {
            if !seen.contains(alias) {
                return Err(PlanError::UnknownSatellite(alias.to_string()));
            }
        }
        Ok(())
    }

    /// Build the declared satellites, then run every step in order.
    ///
    /// Nothing is built or run if the plan fails validation. A satellite with
    /// invalid parameters aborts the run before any step executes.
    pub fn run(
        &self,
        factory: &mut SatelliteFactory,
        center: &mut OperationsCenter,
    ) -> Result<PlanOutcome, PlanError> {
        self.validate()?;

        let mut fleet: HashMap<&str, SatelliteHandle> = HashMap::new();
        for entry in &self.satellites {
            let handle = factory
                .build(entry.params.clone())
                .map_err(|source| PlanError::Satellite {
                    alias: entry.id.clone(),
                    source,
                })?;
            fleet.insert(entry.id.as_str(), handle);
        }

        let mut outcome = PlanOutcome::default();
        for step in &self.steps {
            tracing::debug!(?step, "Running plan step");
            let done = match step {
                Step::CreateConstellation { name } => {
                    center.create_and_register(name) == Registration::Registered
                }
                Step::RemoveConstellation { name } => center.remove_constellation(name).is_done(),
                Step::Attach {
                    constellation,
                    satellite,
                } => {
                    let handle = resolve(&fleet, satellite)?;
                    center.add_satellite(constellation, handle.clone()).is_done()
                }
                Step::Detach {
                    constellation,
                    satellite,
                } => {
                    let handle = resolve(&fleet, satellite)?;
                    center.remove_satellite(constellation, handle).is_done()
                }
                Step::Activate { constellation } => center.activate_all(constellation).is_done(),
                Step::RunMissions {
                    constellation,
                    repeat,
                } => (0..*repeat).all(|_| center.run_missions(constellation).is_done()),
                Step::Status { constellation } => match center.status(constellation) {
                    Dispatch::Done(status) => {
                        outcome.snapshots.push(status);
                        true
                    }
                    Dispatch::InvalidName | Dispatch::NotFound => false,
                },
            };
            if !done {
                outcome.missed_steps += 1;
            }
        }

        Ok(outcome)
    }
}

fn resolve<'a>(
    fleet: &'a HashMap<&str, SatelliteHandle>,
    alias: &str,
) -> Result<&'a SatelliteHandle, PlanError> {
    fleet
        .get(alias)
        .ok_or_else(|| PlanError::UnknownSatellite(alias.to_string()))
}
