use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::battery::Battery;
use super::state::ActivationState;
use crate::error::{OpsError, Result};

/// Charge differences smaller than this are rounding error.
pub const CHARGE_TOLERANCE: f64 = 1e-9;

/// Charge and cost constants every satellite operates under.
///
/// The defaults are the canonical values: a satellite needs strictly more than
/// 15% charge to switch on, and every executed mission costs 8% of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionProfile {
    activation_threshold: f64,
    relay_cost: f64,
    imaging_cost: f64,
}

impl MissionProfile {
    pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.15;
    pub const DEFAULT_RELAY_COST: f64 = 0.08;
    pub const DEFAULT_IMAGING_COST: f64 = 0.08;

    /// Build a profile. Every value must be a fraction in `[0, 1]`.
    pub fn new(activation_threshold: f64, relay_cost: f64, imaging_cost: f64) -> Result<Self> {
        for (field, value) in [
            ("activation_threshold", activation_threshold),
            ("relay_cost", relay_cost),
            ("imaging_cost", imaging_cost),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(OpsError::invalid(format!(
                    "{} must be between 0 and 1, got {}",
                    field, value
                )));
            }
        }
        Ok(Self {
            activation_threshold,
            relay_cost,
            imaging_cost,
        })
    }

    pub fn activation_threshold(&self) -> f64 {
        self.activation_threshold
    }

    pub fn relay_cost(&self) -> f64 {
        self.relay_cost
    }

    pub fn imaging_cost(&self) -> f64 {
        self.imaging_cost
    }

    /// True when `charge` is strictly above the activation threshold.
    ///
    /// Charge that sits within [`CHARGE_TOLERANCE`] of the threshold counts as
    /// equal to it, so repeated depletion cannot leave a satellite a rounding
    /// error above the line.
    pub fn clears_threshold(&self, charge: f64) -> bool {
        charge > self.activation_threshold + CHARGE_TOLERANCE
    }

    /// Per-mission charge cost for the given satellite type.
    pub fn mission_cost(&self, satellite_type: SatelliteType) -> f64 {
        match satellite_type {
            SatelliteType::Relay => self.relay_cost,
            SatelliteType::Imaging => self.imaging_cost,
        }
    }
}

impl Default for MissionProfile {
    fn default() -> Self {
        Self {
            activation_threshold: Self::DEFAULT_ACTIVATION_THRESHOLD,
            relay_cost: Self::DEFAULT_RELAY_COST,
            imaging_cost: Self::DEFAULT_IMAGING_COST,
        }
    }
}

/// The closed set of satellite variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteType {
    Relay,
    Imaging,
}

impl SatelliteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relay => "relay",
            Self::Imaging => "imaging",
        }
    }

    /// Name prefix used when the caller does not pick one.
    pub fn default_prefix(&self) -> &'static str {
        match self {
            Self::Relay => "Relay",
            Self::Imaging => "Imaging",
        }
    }
}

/// Variant-specific parameters and counters.
#[derive(Debug, Clone, PartialEq)]
pub enum SatelliteKind {
    /// Data relay: transmits `throughput` Mbit/s per mission.
    Relay { throughput: f64 },
    /// Earth imaging: captures at `resolution` m/pixel, counting every capture.
    Imaging { resolution: f64, captures: u32 },
}

impl SatelliteKind {
    pub fn relay(throughput: f64) -> Self {
        Self::Relay { throughput }
    }

    pub fn imaging(resolution: f64) -> Self {
        Self::Imaging {
            resolution,
            captures: 0,
        }
    }

    pub fn satellite_type(&self) -> SatelliteType {
        match self {
            Self::Relay { .. } => SatelliteType::Relay,
            Self::Imaging { .. } => SatelliteType::Imaging,
        }
    }

    fn validate(&self) -> Result<()> {
        let (field, value) = match self {
            Self::Relay { throughput } => ("throughput", *throughput),
            Self::Imaging { resolution, .. } => ("resolution", *resolution),
        };
        if value.is_nan() || value < 0.0 {
            return Err(OpsError::invalid(format!(
                "{} must not be negative, got {}",
                field, value
            )));
        }
        Ok(())
    }
}

/// Result of asking a satellite to switch on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// The satellite was inactive and is now active.
    Activated,
    /// The satellite was already active; nothing changed.
    AlreadyActive,
    /// Charge is at or below the activation threshold; the satellite stays off.
    Denied { charge: f64 },
}

impl ActivationOutcome {
    /// True when the satellite is active after the attempt.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Denied { .. })
    }
}

/// The type-specific action a mission carried out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MissionAction {
    Transmitted { throughput: f64 },
    Captured { resolution: f64, capture: u32 },
}

/// Details of an executed mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionReport {
    pub action: MissionAction,
    /// Charge left after the mission's depletion.
    pub charge: f64,
    /// Whether the satellite switched itself off at the end of the mission.
    pub deactivated: bool,
}

/// Result of asking a satellite to perform its mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MissionOutcome {
    Executed(MissionReport),
    /// The satellite was inactive; charge and counters are untouched.
    Skipped,
}

impl MissionOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }
}

/// Read-only snapshot of one satellite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteStatus {
    pub name: String,
    pub kind: SatelliteType,
    pub active: bool,
    pub charge: f64,
    /// Capture count, present for imaging satellites only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captures: Option<u32>,
}

/// A single satellite: identity, battery, on/off state and mission payload.
///
/// # Lifecycle
/// Satellites start inactive. [`try_activate`](Self::try_activate) switches
/// them on only while charge is strictly above the profile's activation
/// threshold. Each executed mission performs the payload action, depletes the
/// battery by the per-mission cost, and then switches the satellite off if the
/// remaining charge is at or below the threshold.
#[derive(Debug, Clone)]
pub struct Satellite {
    name: String,
    battery: Battery,
    state: ActivationState,
    kind: SatelliteKind,
    profile: MissionProfile,
}

impl Satellite {
    /// Create a satellite, rejecting negative variant parameters.
    pub fn new(
        name: impl Into<String>,
        battery: Battery,
        kind: SatelliteKind,
        profile: MissionProfile,
    ) -> Result<Self> {
        kind.validate()?;
        Ok(Self {
            name: name.into(),
            battery,
            state: ActivationState::new(),
            kind,
            profile,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn satellite_type(&self) -> SatelliteType {
        self.kind.satellite_type()
    }

    pub fn profile(&self) -> &MissionProfile {
        &self.profile
    }

    pub fn charge(&self) -> f64 {
        self.battery.level()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Number of captures taken, for imaging satellites.
    pub fn captures(&self) -> Option<u32> {
        match self.kind {
            SatelliteKind::Imaging { captures, .. } => Some(captures),
            SatelliteKind::Relay { .. } => None,
        }
    }

    pub fn try_activate(&mut self) -> ActivationOutcome {
        if self.state.is_active() {
            return ActivationOutcome::AlreadyActive;
        }
        if self.profile.clears_threshold(self.battery.level()) {
            self.state.activate();
            ActivationOutcome::Activated
        } else {
            ActivationOutcome::Denied {
                charge: self.battery.level(),
            }
        }
    }

    /// Switch off unconditionally.
    pub fn deactivate(&mut self) {
        self.state.deactivate();
    }

    pub fn perform_mission(&mut self) -> MissionOutcome {
        if !self.state.is_active() {
            return MissionOutcome::Skipped;
        }

        let action = match &mut self.kind {
            SatelliteKind::Relay { throughput } => MissionAction::Transmitted {
                throughput: *throughput,
            },
            SatelliteKind::Imaging {
                resolution,
                captures,
            } => {
                *captures += 1;
                MissionAction::Captured {
                    resolution: *resolution,
                    capture: *captures,
                }
            }
        };

        // Profile costs are validated non-negative at construction.
        let cost = self.profile.mission_cost(self.satellite_type());
        self.battery.drain(cost);
        let deactivated = self.reconcile_charge_state();

        MissionOutcome::Executed(MissionReport {
            action,
            charge: self.battery.level(),
            deactivated,
        })
    }

    /// Switch off if charge has fallen to the threshold. Returns true when a
    /// transition happened.
    fn reconcile_charge_state(&mut self) -> bool {
        if self.state.is_active() && !self.profile.clears_threshold(self.battery.level()) {
            self.state.deactivate();
            return true;
        }
        false
    }

    pub fn status(&self) -> SatelliteStatus {
        SatelliteStatus {
            name: self.name.clone(),
            kind: self.satellite_type(),
            active: self.is_active(),
            charge: self.charge(),
            captures: self.captures(),
        }
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SatelliteKind::Relay { throughput } => write!(
                f,
                "RelaySatellite{{throughput={}, name='{}', active={}, charge={:.2}}}",
                throughput,
                self.name,
                self.is_active(),
                self.charge()
            ),
            SatelliteKind::Imaging {
                resolution,
                captures,
            } => write!(
                f,
                "ImagingSatellite{{resolution={:.1}, captures={}, name='{}', active={}, charge={:.2}}}",
                resolution,
                captures,
                self.name,
                self.is_active(),
                self.charge()
            ),
        }
    }
}

/// Shared reference to a satellite.
///
/// A satellite can be held by its creator and by any number of constellations
/// at once. Membership is decided by identity of the handle, never by name.
#[derive(Debug, Clone)]
pub struct SatelliteHandle(Rc<RefCell<Satellite>>);

impl SatelliteHandle {
    pub fn new(satellite: Satellite) -> Self {
        Self(Rc::new(RefCell::new(satellite)))
    }

    /// True if both handles point at the same satellite.
    pub fn same_as(&self, other: &SatelliteHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn charge(&self) -> f64 {
        self.0.borrow().charge()
    }

    pub fn is_active(&self) -> bool {
        self.0.borrow().is_active()
    }

    pub fn captures(&self) -> Option<u32> {
        self.0.borrow().captures()
    }

    pub fn status(&self) -> SatelliteStatus {
        self.0.borrow().status()
    }

    pub fn try_activate(&self) -> ActivationOutcome {
        self.0.borrow_mut().try_activate()
    }

    pub fn deactivate(&self) {
        self.0.borrow_mut().deactivate()
    }

    pub fn perform_mission(&self) -> MissionOutcome {
        self.0.borrow_mut().perform_mission()
    }
}

impl From<Satellite> for SatelliteHandle {
    fn from(satellite: Satellite) -> Self {
        Self::new(satellite)
    }
}

impl fmt::Display for SatelliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.borrow(), f)
    }
}
