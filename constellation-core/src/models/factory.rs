use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::battery::Battery;
use super::satellite::{MissionProfile, Satellite, SatelliteHandle, SatelliteKind, SatelliteType};
use crate::error::Result;
use crate::events::{NullReporter, OpsEvent, Reporter};

/// Everything needed to build one satellite.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "relay", "throughput": 500.0, "battery_percent": 65.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SatelliteParams {
    Relay {
        throughput: f64,
        /// Initial charge in percent. Random when omitted.
        #[serde(default)]
        battery_percent: Option<f64>,
        /// Name prefix. Defaults to `Relay`.
        #[serde(default)]
        prefix: Option<String>,
    },
    Imaging {
        resolution: f64,
        #[serde(default)]
        battery_percent: Option<f64>,
        #[serde(default)]
        prefix: Option<String>,
    },
}

impl SatelliteParams {
    pub fn relay(throughput: f64) -> Self {
        Self::Relay {
            throughput,
            battery_percent: None,
            prefix: None,
        }
    }

    pub fn imaging(resolution: f64) -> Self {
        Self::Imaging {
            resolution,
            battery_percent: None,
            prefix: None,
        }
    }

    pub fn with_battery_percent(mut self, percent: f64) -> Self {
        match &mut self {
            Self::Relay {
                battery_percent, ..
            }
            | Self::Imaging {
                battery_percent, ..
            } => *battery_percent = Some(percent),
        }
        self
    }

    pub fn with_prefix(mut self, name_prefix: impl Into<String>) -> Self {
        match &mut self {
            Self::Relay { prefix, .. } | Self::Imaging { prefix, .. } => {
                *prefix = Some(name_prefix.into())
            }
        }
        self
    }

    pub fn satellite_type(&self) -> SatelliteType {
        match self {
            Self::Relay { .. } => SatelliteType::Relay,
            Self::Imaging { .. } => SatelliteType::Imaging,
        }
    }
}

/// Builds satellites and hands out their serial names.
///
/// Each name prefix has its own counter starting at 1, so the first relay is
/// `Relay-1`, the second `Relay-2`, and so on. A rejected construction does
/// not consume a serial number. Charges that are not given explicitly are
/// drawn from the factory's random source.
pub struct SatelliteFactory {
    profile: MissionProfile,
    serials: HashMap<String, u32>,
    rng: StdRng,
    reporter: Rc<dyn Reporter>,
}

impl SatelliteFactory {
    pub fn new(profile: MissionProfile) -> Self {
        Self {
            profile,
            serials: HashMap::new(),
            rng: StdRng::from_entropy(),
            reporter: Rc::new(NullReporter),
        }
    }

    /// Make random charges reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_reporter(mut self, reporter: Rc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn profile(&self) -> &MissionProfile {
        &self.profile
    }

    pub fn supports(&self, satellite_type: SatelliteType) -> bool {
        matches!(satellite_type, SatelliteType::Relay | SatelliteType::Imaging)
    }

    pub fn build(&mut self, params: SatelliteParams) -> Result<SatelliteHandle> {
        let satellite_type = params.satellite_type();
        let (kind, battery_percent, prefix) = match params {
            SatelliteParams::Relay {
                throughput,
                battery_percent,
                prefix,
            } => (SatelliteKind::relay(throughput), battery_percent, prefix),
            SatelliteParams::Imaging {
                resolution,
                battery_percent,
                prefix,
            } => (SatelliteKind::imaging(resolution), battery_percent, prefix),
        };

        let battery = match battery_percent {
            Some(percent) => Battery::from_percent(percent)?,
            None => Battery::random(&mut self.rng),
        };
        let prefix = prefix.unwrap_or_else(|| satellite_type.default_prefix().to_string());
        let serial = self.serials.get(&prefix).copied().unwrap_or(0) + 1;

        let satellite = Satellite::new(format!("{}-{}", prefix, serial), battery, kind, self.profile)?;
        self.serials.insert(prefix, serial);

        self.reporter.report(&OpsEvent::SatelliteCreated {
            satellite: satellite.name().to_string(),
            kind: satellite_type,
            charge: satellite.charge(),
        });

        Ok(SatelliteHandle::new(satellite))
    }

    pub fn relay(&mut self, throughput: f64) -> Result<SatelliteHandle> {
        self.build(SatelliteParams::relay(throughput))
    }

    pub fn relay_with_charge(&mut self, throughput: f64, percent: f64) -> Result<SatelliteHandle> {
        self.build(SatelliteParams::relay(throughput).with_battery_percent(percent))
    }

    pub fn imaging(&mut self, resolution: f64) -> Result<SatelliteHandle> {
        self.build(SatelliteParams::imaging(resolution))
    }

    pub fn imaging_with_charge(
        &mut self,
        resolution: f64,
        percent: f64,
    ) -> Result<SatelliteHandle> {
        self.build(SatelliteParams::imaging(resolution).with_battery_percent(percent))
    }
}

impl Default for SatelliteFactory {
    fn default() -> Self {
        Self::new(MissionProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpsError;
    use crate::events::MemoryReporter;

    #[test]
    fn test_serials_are_per_prefix() {
        let mut factory = SatelliteFactory::default();
        assert_eq!(factory.relay(500.0).unwrap().name(), "Relay-1");
        assert_eq!(factory.relay(1000.0).unwrap().name(), "Relay-2");
        assert_eq!(factory.imaging(2.5).unwrap().name(), "Imaging-1");

        let custom = factory
            .build(SatelliteParams::imaging(1.0).with_prefix("Sentinel"))
            .unwrap();
        assert_eq!(custom.name(), "Sentinel-1");
        assert_eq!(factory.imaging(0.5).unwrap().name(), "Imaging-2");
    }

    #[test]
    fn test_rejected_build_keeps_serial() {
        let mut factory = SatelliteFactory::default();
        assert!(matches!(
            factory.relay(-10.0),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(factory.relay_with_charge(10.0, 120.0).is_err());
        assert_eq!(factory.relay(10.0).unwrap().name(), "Relay-1");
    }

    #[test]
    fn test_explicit_charge_is_used() {
        let mut factory = SatelliteFactory::default();
        let sat = factory.relay_with_charge(500.0, 65.0).unwrap();
        assert!((sat.charge() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_factories_agree() {
        let mut a = SatelliteFactory::default().with_seed(42);
        let mut b = SatelliteFactory::default().with_seed(42);
        for _ in 0..5 {
            assert_eq!(a.imaging(1.0).unwrap().charge(), b.imaging(1.0).unwrap().charge());
        }
    }

    #[test]
    fn test_build_reports_creation() {
        let reporter = Rc::new(MemoryReporter::new());
        let mut factory = SatelliteFactory::default().with_reporter(reporter.clone());
        factory.imaging_with_charge(2.5, 40.0).unwrap();
        let _ = factory.imaging(-1.0);

        let events = reporter.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            OpsEvent::SatelliteCreated {
                satellite: "Imaging-1".to_string(),
                kind: SatelliteType::Imaging,
                charge: 0.4,
            }
        );
    }

    #[test]
    fn test_params_deserialize_from_tagged_json() {
        let params: SatelliteParams =
            serde_json::from_str(r#"{"type": "relay", "throughput": 500.0, "battery_percent": 65.0}"#)
                .unwrap();
        assert_eq!(
            params,
            SatelliteParams::relay(500.0).with_battery_percent(65.0)
        );
        assert_eq!(params.satellite_type(), SatelliteType::Relay);
    }

    #[test]
    fn test_supports_both_types() {
        let factory = SatelliteFactory::default();
        assert!(factory.supports(SatelliteType::Relay));
        assert!(factory.supports(SatelliteType::Imaging));
    }
}
