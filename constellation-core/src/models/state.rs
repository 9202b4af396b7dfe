use serde::Serialize;

/// Whether a satellite is currently switched on.
///
/// Always starts inactive. Both transitions are unconditional and idempotent;
/// the charge checks live in [`Satellite`](super::Satellite).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivationState {
    active: bool,
}

impl ActivationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
