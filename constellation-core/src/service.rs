//! Validating entry point for all constellation operations.
//!
//! [`OperationsCenter`] checks names before touching the store, reports every
//! state change to its [`Reporter`], and turns missing constellations into
//! [`Dispatch::NotFound`] instead of failing.

use std::rc::Rc;

use crate::events::{NullReporter, OpsEvent, Reporter};
use crate::models::{
    ActivationReport, Constellation, ConstellationStatus, MemberState, MissionLog,
    SatelliteHandle,
};
use crate::store::{Attachment, ConstellationStore, Detachment, Insertion};

/// Result of [`OperationsCenter::create_and_register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// A constellation with that name already existed and was kept.
    Duplicate,
    InvalidName,
}

/// Result of an operation addressed to a constellation by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T> {
    Done(T),
    /// The name was blank; nothing was looked up.
    InvalidName,
    NotFound,
}

impl<T> Dispatch<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::InvalidName | Self::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Dispatch<U> {
        match self {
            Self::Done(value) => Dispatch::Done(f(value)),
            Self::InvalidName => Dispatch::InvalidName,
            Self::NotFound => Dispatch::NotFound,
        }
    }
}

/// Facade over a [`ConstellationStore`].
///
/// Holds no state beyond the store it fronts and the reporter it writes to.
pub struct OperationsCenter {
    store: ConstellationStore,
    reporter: Rc<dyn Reporter>,
}

impl OperationsCenter {
    pub fn new(store: ConstellationStore, reporter: Rc<dyn Reporter>) -> Self {
        Self { store, reporter }
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &ConstellationStore {
        &self.store
    }

    pub fn has_constellations(&self) -> bool {
        self.store.has_any()
    }

    pub fn constellation_names(&self) -> Vec<String> {
        self.store.names()
    }

    pub fn create_and_register(&mut self, name: &str) -> Registration {
        if !self.check_name(name) {
            return Registration::InvalidName;
        }
        match self.store.add(Constellation::new(name)) {
            Insertion::Added => {
                self.report(OpsEvent::ConstellationSaved {
                    constellation: name.to_string(),
                });
                Registration::Registered
            }
            Insertion::Duplicate(_) => {
                self.report(OpsEvent::ConstellationDuplicate {
                    constellation: name.to_string(),
                });
                Registration::Duplicate
            }
        }
    }

    pub fn remove_constellation(&mut self, name: &str) -> Dispatch<()> {
        if !self.check_name(name) {
            return Dispatch::InvalidName;
        }
        match self.store.remove(name) {
            Some(_) => {
                self.report(OpsEvent::ConstellationRemoved {
                    constellation: name.to_string(),
                });
                Dispatch::Done(())
            }
            None => self.not_found(name),
        }
    }

    pub fn add_satellite(&mut self, name: &str, satellite: SatelliteHandle) -> Dispatch<()> {
        if !self.check_name(name) {
            return Dispatch::InvalidName;
        }
        let satellite_name = satellite.name();
        match self.store.add_unit_to(name, satellite) {
            Attachment::ConstellationNotFound => self.not_found(name),
            Attachment::Attached => {
                self.report(OpsEvent::SatelliteAttached {
                    constellation: name.to_string(),
                    satellite: satellite_name,
                });
                Dispatch::Done(())
            }
        }
    }

    pub fn remove_satellite(&mut self, name: &str, satellite: &SatelliteHandle) -> Dispatch<()> {
        if !self.check_name(name) {
            return Dispatch::InvalidName;
        }
        match self.store.remove_unit_from(name, satellite) {
            Detachment::ConstellationNotFound => self.not_found(name),
            Detachment::NotAMember => Dispatch::Done(()),
            Detachment::Detached => {
                self.report(OpsEvent::SatelliteDetached {
                    constellation: name.to_string(),
                    satellite: satellite.name(),
                });
                Dispatch::Done(())
            }
        }
    }

    pub fn activate_all(&self, name: &str) -> Dispatch<Vec<ActivationReport>> {
        let constellation = match self.lookup(name) {
            Dispatch::Done(c) => c,
            Dispatch::InvalidName => return Dispatch::InvalidName,
            Dispatch::NotFound => return Dispatch::NotFound,
        };
        if constellation.is_empty() {
            self.report(OpsEvent::EmptyConstellation {
                constellation: name.to_string(),
            });
        }
        let reports = constellation.activate_all();
        for report in &reports {
            self.report(OpsEvent::ActivationAttempted {
                satellite: report.satellite.clone(),
                outcome: report.outcome,
            });
        }
        Dispatch::Done(reports)
    }

    pub fn run_missions(&self, name: &str) -> Dispatch<Vec<MissionLog>> {
        let constellation = match self.lookup(name) {
            Dispatch::Done(c) => c,
            Dispatch::InvalidName => return Dispatch::InvalidName,
            Dispatch::NotFound => return Dispatch::NotFound,
        };
        if constellation.is_empty() {
            self.report(OpsEvent::EmptyConstellation {
                constellation: name.to_string(),
            });
        }
        let log = constellation.run_all_missions();
        for entry in &log {
            self.report(OpsEvent::MissionAttempted {
                satellite: entry.satellite.clone(),
                outcome: entry.outcome,
            });
        }
        Dispatch::Done(log)
    }

    pub fn status(&self, name: &str) -> Dispatch<ConstellationStatus> {
        self.lookup(name).map(Constellation::status)
    }

    pub fn member_statuses(&self, name: &str) -> Dispatch<Vec<MemberState>> {
        self.lookup(name).map(Constellation::member_statuses)
    }

    fn lookup(&self, name: &str) -> Dispatch<&Constellation> {
        if !self.check_name(name) {
            return Dispatch::InvalidName;
        }
        match self.store.by_name(name) {
            Some(constellation) => Dispatch::Done(constellation),
            None => self.not_found(name),
        }
    }

    fn check_name(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            self.report(OpsEvent::InvalidName {
                name: name.to_string(),
            });
            return false;
        }
        true
    }

    fn not_found<T>(&self, name: &str) -> Dispatch<T> {
        self.report(OpsEvent::ConstellationNotFound {
            constellation: name.to_string(),
        });
        Dispatch::NotFound
    }

    fn report(&self, event: OpsEvent) {
        self.reporter.report(&event);
    }
}

impl Default for OperationsCenter {
    fn default() -> Self {
        Self::new(ConstellationStore::new(), Rc::new(NullReporter))
    }
}
