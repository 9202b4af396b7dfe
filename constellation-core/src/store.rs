//! In-memory keyed store of constellations.

use std::collections::BTreeMap;

use crate::models::{Constellation, SatelliteHandle};

/// Result of [`ConstellationStore::add`].
#[derive(Debug)]
pub enum Insertion {
    Added,
    /// The name was taken. The stored constellation is untouched and the
    /// rejected one is handed back.
    Duplicate(Constellation),
}

impl Insertion {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Result of [`ConstellationStore::add_unit_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Attached,
    ConstellationNotFound,
}

/// Result of [`ConstellationStore::remove_unit_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detachment {
    Detached,
    /// The constellation exists but the satellite was not a member. Nothing
    /// changed.
    NotAMember,
    ConstellationNotFound,
}

/// Constellations keyed by name. At most one constellation per name; the
/// first one registered under a name wins.
#[derive(Debug, Default)]
pub struct ConstellationStore {
    constellations: BTreeMap<String, Constellation>,
}

impl ConstellationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, constellation: Constellation) -> Insertion {
        if self.constellations.contains_key(constellation.name()) {
            return Insertion::Duplicate(constellation);
        }
        self.constellations
            .insert(constellation.name().to_string(), constellation);
        Insertion::Added
    }

    /// Remove and return the constellation registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Constellation> {
        self.constellations.remove(name)
    }

    pub fn by_name(&self, name: &str) -> Option<&Constellation> {
        self.constellations.get(name)
    }

    pub fn add_unit_to(&mut self, name: &str, satellite: SatelliteHandle) -> Attachment {
        match self.constellations.get_mut(name) {
            Some(constellation) => {
                constellation.add_unit(satellite);
                Attachment::Attached
            }
            None => Attachment::ConstellationNotFound,
        }
    }

    pub fn remove_unit_from(&mut self, name: &str, satellite: &SatelliteHandle) -> Detachment {
        match self.constellations.get_mut(name) {
            Some(constellation) => {
                if constellation.remove_unit(satellite) {
                    Detachment::Detached
                } else {
                    Detachment::NotAMember
                }
            }
            None => Detachment::ConstellationNotFound,
        }
    }

    pub fn has_any(&self) -> bool {
        !self.constellations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constellations.is_empty()
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<String> {
        self.constellations.keys().cloned().collect()
    }
}
