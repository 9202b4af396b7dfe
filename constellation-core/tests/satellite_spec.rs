use constellation_core::models::*;
use constellation_core::OpsError;
use speculate2::speculate;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

speculate! {
    before {
        let mut factory = SatelliteFactory::default().with_seed(7);
    }

    describe "battery" {
        it "depletes to max(0, charge - amount) for non-negative amounts" {
            for (start, amount) in [(50.0, 0.1), (50.0, 0.5), (50.0, 0.9), (10.0, 0.0), (0.0, 0.3)] {
                let mut battery = Battery::from_percent(start).expect("valid percent");
                let level = battery.level();
                battery.deplete(amount).expect("non-negative amount");
                assert!(approx(battery.level(), (level - amount).max(0.0)));
            }
        }

        it "rejects negative depletion without touching the charge" {
            let mut battery = Battery::from_percent(30.0).expect("valid percent");
            let result = battery.deplete(-0.01);
            assert!(matches!(result, Err(OpsError::InvalidParameter(_))));
            assert!(approx(battery.level(), 0.3));
        }
    }

    describe "activation" {
        it "is idempotent once active" {
            let sat = factory.imaging_with_charge(1.0, 70.0).expect("valid satellite");
            assert_eq!(sat.try_activate(), ActivationOutcome::Activated);
            for _ in 0..3 {
                assert_eq!(sat.try_activate(), ActivationOutcome::AlreadyActive);
                assert!(sat.is_active());
                assert!(approx(sat.charge(), 0.7));
            }
        }

        it "denies activation at or below the threshold" {
            let sat = factory.imaging_with_charge(1.0, 15.0).expect("valid satellite");
            assert!(matches!(sat.try_activate(), ActivationOutcome::Denied { .. }));
            assert!(!sat.is_active());
            assert_eq!(sat.perform_mission(), MissionOutcome::Skipped);
            assert_eq!(sat.captures(), Some(0));
        }

        it "denies a randomly charged imaging satellite below the threshold" {
            // Build until one lands at or under the threshold.
            let sat = loop {
                let candidate = factory.imaging(1.0).expect("valid satellite");
                if candidate.charge() <= MissionProfile::DEFAULT_ACTIVATION_THRESHOLD {
                    break candidate;
                }
            };
            let outcome = sat.try_activate();
            assert_eq!(outcome, ActivationOutcome::Denied { charge: sat.charge() });
            assert!(!outcome.is_active());
            assert_eq!(sat.captures(), Some(0));
        }
    }

    describe "missions" {
        it "runs a relay down to self-deactivation after the seventh mission" {
            let relay = factory.relay_with_charge(500.0, 65.0).expect("valid satellite");
            assert!(approx(relay.charge(), 0.65));
            assert_eq!(relay.try_activate(), ActivationOutcome::Activated);

            for mission in 1..=6 {
                let outcome = relay.perform_mission();
                assert!(outcome.is_executed(), "mission {} should execute", mission);
                assert!(relay.is_active());
            }

            match relay.perform_mission() {
                MissionOutcome::Executed(report) => {
                    assert_eq!(report.action, MissionAction::Transmitted { throughput: 500.0 });
                    assert!(report.deactivated);
                    assert!(approx(report.charge, 0.09));
                }
                MissionOutcome::Skipped => panic!("seventh mission should execute"),
            }
            assert!(!relay.is_active());

            assert_eq!(relay.perform_mission(), MissionOutcome::Skipped);
            assert!(approx(relay.charge(), 0.09));
        }

        it "deactivates when depletion lands on the threshold" {
            // 0.23 - 0.08 is 0.15000000000000002 in floating point.
            let relay = factory.relay_with_charge(500.0, 23.0).expect("valid satellite");
            assert_eq!(relay.try_activate(), ActivationOutcome::Activated);

            let MissionOutcome::Executed(report) = relay.perform_mission() else {
                panic!("first mission should execute");
            };
            assert!(report.deactivated);
            assert!(approx(report.charge, 0.15));
            assert!(!relay.is_active());
            assert_eq!(relay.perform_mission(), MissionOutcome::Skipped);
        }

        it "executes the exact number of missions for every starting percentage" {
            for percent in 16..=100u32 {
                let relay = factory
                    .relay_with_charge(500.0, f64::from(percent))
                    .expect("valid satellite");
                assert_eq!(relay.try_activate(), ActivationOutcome::Activated);

                let mut executed = 0;
                while relay.perform_mission().is_executed() {
                    executed += 1;
                }
                // Whole basis points: charge 100p, threshold 1500, cost 800.
                let expected = (percent * 100 - 1500).div_ceil(800);
                assert_eq!(executed, expected, "starting at {}%", percent);
                assert!(!relay.is_active());
            }
        }

        it "never changes charge or captures when inactive" {
            let sat = factory.imaging_with_charge(0.5, 90.0).expect("valid satellite");
            for _ in 0..5 {
                assert_eq!(sat.perform_mission(), MissionOutcome::Skipped);
            }
            assert!(approx(sat.charge(), 0.9));
            assert_eq!(sat.captures(), Some(0));
        }

        it "counts one capture per executed mission" {
            let sat = factory.imaging_with_charge(2.5, 40.0).expect("valid satellite");
            sat.try_activate();
            let mut executed = 0;
            for _ in 0..5 {
                if sat.perform_mission().is_executed() {
                    executed += 1;
                }
            }
            // 0.40 -> 0.32 -> 0.24 -> 0.16 -> 0.08 (off), then skipped
            assert_eq!(executed, 4);
            assert_eq!(sat.captures(), Some(4));
            assert!(!sat.is_active());
        }

        it "deactivates exactly once, after the depleting mission" {
            let sat = factory.relay_with_charge(1.0, 20.0).expect("valid satellite");
            sat.try_activate();
            let first = sat.perform_mission();
            let MissionOutcome::Executed(report) = first else {
                panic!("mission should execute");
            };
            assert!(report.deactivated);
            assert_eq!(sat.perform_mission(), MissionOutcome::Skipped);
        }
    }

    describe "construction" {
        it "fails fast on negative parameters" {
            assert!(matches!(factory.relay(-1.0), Err(OpsError::InvalidParameter(_))));
            assert!(matches!(factory.imaging(-0.1), Err(OpsError::InvalidParameter(_))));
            assert!(matches!(
                factory.relay_with_charge(1.0, 101.0),
                Err(OpsError::InvalidParameter(_))
            ));
        }

        it "honours a custom mission profile" {
            let profile = MissionProfile::new(0.20, 0.05, 0.08).expect("valid profile");
            let mut strict = SatelliteFactory::new(profile);
            let sat = strict.relay_with_charge(1.0, 20.0).expect("valid satellite");
            assert!(matches!(sat.try_activate(), ActivationOutcome::Denied { .. }));

            let sat = strict.relay_with_charge(1.0, 30.0).expect("valid satellite");
            sat.try_activate();
            sat.perform_mission();
            assert!(approx(sat.charge(), 0.25));
            assert!(sat.is_active());
        }
    }
}
