//! Core model for operating satellite constellations.
//!
//! Satellites carry a battery that gates activation and drains with every
//! mission. Constellations group satellites under a unique name and fan bulk
//! operations out to them. The [`ConstellationStore`](store::ConstellationStore)
//! keeps constellations keyed by name, and the
//! [`OperationsCenter`](service::OperationsCenter) is the validating facade
//! callers are expected to go through.
//!
//! ```
//! use constellation_core::models::SatelliteFactory;
//! use constellation_core::service::{OperationsCenter, Registration};
//!
//! let mut factory = SatelliteFactory::default();
//! let mut center = OperationsCenter::default();
//!
//! assert_eq!(center.create_and_register("Orbit-1"), Registration::Registered);
//! let relay = factory.relay_with_charge(500.0, 65.0).unwrap();
//! center.add_satellite("Orbit-1", relay.clone());
//! center.activate_all("Orbit-1");
//! assert!(relay.is_active());
//! ```

pub mod error;
pub mod events;
pub mod models;
pub mod service;
pub mod store;

pub use error::{OpsError, Result};
pub use events::{MemoryReporter, NullReporter, OpsEvent, Reporter, TracingReporter};
