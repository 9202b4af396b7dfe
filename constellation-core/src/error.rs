use thiserror::Error;

/// Hard failures raised by the core.
///
/// Only invalid numeric input is an error. Missing constellations, duplicate
/// registrations and denied activations are ordinary outcomes and are returned
/// as values by the operations that produce them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
