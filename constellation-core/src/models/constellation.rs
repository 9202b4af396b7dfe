use std::fmt;

use serde::Serialize;

use super::satellite::{ActivationOutcome, MissionOutcome, SatelliteHandle, SatelliteStatus};

/// Outcome of a bulk operation for one member, in membership order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberOutcome<T> {
    pub satellite: String,
    pub outcome: T,
}

pub type ActivationReport = MemberOutcome<ActivationOutcome>;
pub type MissionLog = MemberOutcome<MissionOutcome>;

/// `(name, active)` pair for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberState {
    pub name: String,
    pub active: bool,
}

/// Read-only snapshot of a constellation and all its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstellationStatus {
    pub name: String,
    pub members: Vec<SatelliteStatus>,
}

impl ConstellationStatus {
    pub fn active_count(&self) -> usize {
        self.members.iter().filter(|m| m.active).count()
    }
}

/// A named, ordered group of satellites.
///
/// The name is fixed at construction. Members keep insertion order and are
/// compared by handle identity, so the same satellite may appear more than
/// once and two satellites with equal fields are still distinct.
#[derive(Debug, Clone)]
pub struct Constellation {
    name: String,
    members: Vec<SatelliteHandle>,
}

impl Constellation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[SatelliteHandle] {
        &self.members
    }

    pub fn add_unit(&mut self, satellite: SatelliteHandle) {
        self.members.push(satellite);
    }

    /// Remove the first occurrence of `satellite`. Returns false if it was not
    /// a member.
    pub fn remove_unit(&mut self, satellite: &SatelliteHandle) -> bool {
        match self.members.iter().position(|m| m.same_as(satellite)) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains_unit(&self, satellite: &SatelliteHandle) -> bool {
        self.members.iter().any(|m| m.same_as(satellite))
    }

    /// Try to activate every member. One member being denied does not affect
    /// the others. Empty when the constellation has no members.
    pub fn activate_all(&self) -> Vec<ActivationReport> {
        self.members
            .iter()
            .map(|m| MemberOutcome {
                satellite: m.name(),
                outcome: m.try_activate(),
            })
            .collect()
    }

    /// Ask every member to perform its mission, in membership order.
    pub fn run_all_missions(&self) -> Vec<MissionLog> {
        self.members
            .iter()
            .map(|m| MemberOutcome {
                satellite: m.name(),
                outcome: m.perform_mission(),
            })
            .collect()
    }

    pub fn member_statuses(&self) -> Vec<MemberState> {
        self.members
            .iter()
            .map(|m| MemberState {
                name: m.name(),
                active: m.is_active(),
            })
            .collect()
    }

    pub fn status(&self) -> ConstellationStatus {
        ConstellationStatus {
            name: self.name.clone(),
            members: self.members.iter().map(SatelliteHandle::status).collect(),
        }
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constellation{{name='{}', satellites=[", self.name)?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member)?;
        }
        write!(f, "]}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SatelliteFactory;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut factory = SatelliteFactory::default();
        let mut constellation = Constellation::new("Orbit-1");
        constellation.add_unit(factory.relay_with_charge(500.0, 50.0).unwrap());
        constellation.add_unit(factory.imaging_with_charge(1.0, 50.0).unwrap());

        let names: Vec<_> = constellation
            .member_statuses()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Relay-1", "Imaging-1"]);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let mut factory = SatelliteFactory::default();
        let sat = factory.relay(1.0).unwrap();
        let mut constellation = Constellation::new("Orbit-1");
        constellation.add_unit(sat.clone());
        constellation.add_unit(sat.clone());

        assert!(constellation.remove_unit(&sat));
        assert_eq!(constellation.len(), 1);
        assert!(constellation.contains_unit(&sat));
        assert!(constellation.remove_unit(&sat));
        assert!(!constellation.remove_unit(&sat));
        assert!(constellation.is_empty());
    }

    #[test]
    fn test_membership_is_by_identity() {
        let mut factory = SatelliteFactory::default();
        let member = factory.relay_with_charge(1.0, 50.0).unwrap();
        let stranger = factory.relay_with_charge(1.0, 50.0).unwrap();
        let mut constellation = Constellation::new("Orbit-1");
        constellation.add_unit(member.clone());

        assert!(constellation.contains_unit(&member));
        assert!(!constellation.contains_unit(&stranger));
        assert!(!constellation.remove_unit(&stranger));
        assert_eq!(constellation.len(), 1);
    }

    #[test]
    fn test_activate_all_is_independent_per_member() {
        let mut factory = SatelliteFactory::default();
        let mut constellation = Constellation::new("Orbit-1");
        constellation.add_unit(factory.relay_with_charge(500.0, 10.0).unwrap());
        constellation.add_unit(factory.imaging_with_charge(1.0, 90.0).unwrap());

        let reports = constellation.activate_all();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].satellite, "Relay-1");
        assert!(matches!(reports[0].outcome, ActivationOutcome::Denied { .. }));
        assert_eq!(reports[1].outcome, ActivationOutcome::Activated);

        let states = constellation.member_statuses();
        assert!(!states[0].active);
        assert!(states[1].active);
    }

    #[test]
    fn test_empty_constellation_bulk_operations() {
        let constellation = Constellation::new("Empty");
        assert!(constellation.activate_all().is_empty());
        assert!(constellation.run_all_missions().is_empty());
        assert_eq!(constellation.status().members.len(), 0);
    }

    #[test]
    fn test_run_all_missions_skips_inactive_members() {
        let mut factory = SatelliteFactory::default();
        let mut constellation = Constellation::new("Orbit-1");
        let active = factory.imaging_with_charge(1.0, 90.0).unwrap();
        let idle = factory.imaging_with_charge(1.0, 90.0).unwrap();
        active.try_activate();
        constellation.add_unit(active.clone());
        constellation.add_unit(idle.clone());

        let log = constellation.run_all_missions();
        assert!(log[0].outcome.is_executed());
        assert_eq!(log[1].outcome, MissionOutcome::Skipped);
        assert_eq!(active.captures(), Some(1));
        assert_eq!(idle.captures(), Some(0));
        assert_eq!(constellation.status().active_count(), 1);
    }

    #[test]
    fn test_display_lists_members() {
        let mut factory = SatelliteFactory::default();
        let mut constellation = Constellation::new("Orbit-1");
        constellation.add_unit(factory.relay_with_charge(500.0, 50.0).unwrap());
        let text = constellation.to_string();
        assert!(text.starts_with("Constellation{name='Orbit-1', satellites=[RelaySatellite{"));
        assert!(text.ends_with("]}"));
    }
}
