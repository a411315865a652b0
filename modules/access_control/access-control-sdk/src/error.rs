use thiserror::Error;

/// Errors from cache backends.
///
/// Consumers treat every variant the same way: a failed read is a miss, a
/// failed write is a dropped entry. A cache failure must never fail the
/// operation it was meant to speed up.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// The backend cannot be reached.
    #[error("cache backend unavailable: {message}")]
    Unavailable { message: String },

    /// A value could not be encoded or decoded.
    #[error("cache serialization failed: {message}")]
    Serialization { message: String },

    /// Anything else the backend reports.
    #[error("cache backend error: {message}")]
    Backend { message: String },
}

impl CacheError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
