use thiserror::Error;

/// Errors surfaced by agency directory calls.
///
/// Callers on query paths treat every variant as "no contribution from this
/// integration": a broken optional collaborator must never fail the query it
/// decorates.
#[derive(Error, Debug, Clone)]
pub enum AgencyError {
    /// The integration is installed but currently unreachable.
    #[error("agency directory unavailable")]
    Unavailable,

    /// Anything else the integration reports.
    #[error("agency directory error: {message}")]
    Internal { message: String },
}

impl AgencyError {
    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
