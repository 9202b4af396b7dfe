//! Human-readable output: status boards and console narration.

use std::cell::RefCell;
use std::io::Write;

use constellation_core::models::{
    ActivationOutcome, ConstellationStatus, MissionAction, MissionOutcome, SatelliteStatus,
};
use constellation_core::{OpsEvent, Reporter};

const ACTIVE: char = '●';
const INACTIVE: char = '○';

fn state_symbol(active: bool) -> char {
    if active {
        ACTIVE
    } else {
        INACTIVE
    }
}

fn percent(charge: f64) -> String {
    format!("{:.0}%", charge * 100.0)
}

/// Render a constellation snapshot as a tree with state symbols.
///
/// Example output:
/// ```text
/// Orbit-1 (2 satellites, 1 active)
/// ├── ● Relay-1 [relay] charge 57%
/// └── ○ Imaging-1 [imaging] charge 12%, captures 0
/// ```
pub fn render_status(status: &ConstellationStatus) -> String {
    let mut output = format!(
        "{} ({} satellites, {} active)\n",
        status.name,
        status.members.len(),
        status.active_count()
    );
    for (i, member) in status.members.iter().enumerate() {
        let is_last = i == status.members.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(branch);
        render_member(&mut output, member);
        output.push('\n');
    }
    output
}

fn render_member(output: &mut String, member: &SatelliteStatus) {
    output.push(state_symbol(member.active));
    output.push(' ');
    output.push_str(&format!(
        "{} [{}] charge {}",
        member.name,
        member.kind.as_str(),
        percent(member.charge)
    ));
    if let Some(captures) = member.captures {
        output.push_str(&format!(", captures {}", captures));
    }
}

/// One line of narration for an event.
pub fn narrate(event: &OpsEvent) -> String {
    match event {
        OpsEvent::SatelliteCreated {
            satellite, charge, ..
        } => format!("Created satellite {} (charge: {})", satellite, percent(*charge)),
        OpsEvent::ActivationAttempted { satellite, outcome } => match outcome {
            ActivationOutcome::Activated => format!("{}: activation successful", satellite),
            ActivationOutcome::AlreadyActive => format!("{}: already active", satellite),
            ActivationOutcome::Denied { charge } => format!(
                "{}: activation failed (charge: {})",
                satellite,
                percent(*charge)
            ),
        },
        OpsEvent::MissionAttempted { satellite, outcome } => match outcome {
            MissionOutcome::Executed(report) => {
                let action = match report.action {
                    MissionAction::Transmitted { throughput } => {
                        format!("transmitted data at {:.1} Mbit/s", throughput)
                    }
                    MissionAction::Captured {
                        resolution,
                        capture,
                    } => format!("capture #{} at {:.1} m/pixel", capture, resolution),
                };
                let mut line = format!(
                    "{}: {} (charge: {})",
                    satellite,
                    action,
                    percent(report.charge)
                );
                if report.deactivated {
                    line.push_str(", battery low, deactivated");
                }
                line
            }
            MissionOutcome::Skipped => format!("{}: mission skipped, not active", satellite),
        },
        OpsEvent::ConstellationSaved { constellation } => {
            format!("Saved constellation: {}", constellation)
        }
        OpsEvent::ConstellationDuplicate { constellation } => {
            format!("Constellation {} already exists in the store", constellation)
        }
        OpsEvent::ConstellationRemoved { constellation } => {
            format!("Removed constellation: {}", constellation)
        }
        OpsEvent::ConstellationNotFound { constellation } => {
            format!("Constellation {} does not exist", constellation)
        }
        OpsEvent::SatelliteAttached {
            constellation,
            satellite,
        } => format!("Added satellite {} to constellation {}", satellite, constellation),
        OpsEvent::SatelliteDetached {
            constellation,
            satellite,
        } => format!(
            "Removed satellite {} from constellation {}",
            satellite, constellation
        ),
        OpsEvent::EmptyConstellation { constellation } => {
            format!("Constellation {} has no satellites", constellation)
        }
        OpsEvent::InvalidName { name } => format!("Invalid constellation name {:?}", name),
    }
}

/// Writes one narration line per event.
pub struct ConsoleReporter<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&self, event: &OpsEvent) {
        // Narration is best-effort; a closed pipe must not stop operations.
        let _ = writeln!(self.out.borrow_mut(), "{}", narrate(event));
    }
}
