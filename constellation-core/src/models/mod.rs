//! Domain models for constellation operations.
//!
//! # Core Concepts
//!
//! - [`Battery`]: depletable charge in `[0, 1]`, clamped at zero.
//! - [`ActivationState`]: the on/off flag of a satellite.
//! - [`Satellite`]: battery + state + a variant payload ([`SatelliteKind`]).
//!   Relay satellites transmit data, imaging satellites take and count captures.
//!   Both spend a fixed share of charge per executed mission and switch
//!   themselves off once charge falls to the activation threshold.
//! - [`SatelliteFactory`]: builds satellites from [`SatelliteParams`] and owns
//!   the per-prefix serial counters used for names like `Relay-3`.
//! - [`Constellation`]: named, ordered group of [`SatelliteHandle`]s that fans
//!   activation and missions out to its members.

mod battery;
mod constellation;
mod factory;
mod satellite;
mod state;

pub use battery::*;
pub use constellation::*;
pub use factory::*;
pub use satellite::*;
pub use state::*;
