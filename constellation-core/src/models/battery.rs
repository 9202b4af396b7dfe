use rand::Rng;
use serde::Serialize;

use crate::error::{OpsError, Result};

const MIN_PERCENT: f64 = 0.0;
const MAX_PERCENT: f64 = 100.0;

/// The depletable charge of a satellite, stored as a fraction of full capacity.
///
/// Charge starts somewhere in `[0, 1]` and only ever goes down. Depletion
/// clamps at zero, so the level is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Battery {
    charge: f64,
}

impl Battery {
    /// A battery with a uniformly random charge in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            charge: rng.gen::<f64>(),
        }
    }

    /// A battery charged to `percent` of capacity.
    ///
    /// `percent` must lie in `[0, 100]`.
    pub fn from_percent(percent: f64) -> Result<Self> {
        if !(MIN_PERCENT..=MAX_PERCENT).contains(&percent) {
            return Err(OpsError::invalid(format!(
                "battery charge must be between {:.2} and {:.2} percent, got {}",
                MIN_PERCENT, MAX_PERCENT, percent
            )));
        }
        Ok(Self {
            charge: percent / 100.0,
        })
    }

    /// Remove `amount` from the charge, stopping at zero.
    pub fn deplete(&mut self, amount: f64) -> Result<()> {
        if amount.is_nan() || amount < 0.0 {
            return Err(OpsError::invalid(format!(
                "depletion amount must not be negative, got {}",
                amount
            )));
        }
        self.drain(amount);
        Ok(())
    }

    /// Clamp-subtract an amount already known to be non-negative.
    pub(crate) fn drain(&mut self, amount: f64) {
        self.charge = (self.charge - amount).max(0.0);
    }

    pub fn level(&self) -> f64 {
        self.charge
    }
}
