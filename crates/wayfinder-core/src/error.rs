use thiserror::Error;

/// Core error type shared by every Wayfinder component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A slug or id resolved to nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation on create
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backing store unreachable or returned a generic failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// An invariant was violated at creation time
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
