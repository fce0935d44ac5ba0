//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Malformed calendar date
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("Invalid date '{input}': {reason}")]
pub struct ParseError {
    /// The raw string that failed to parse
    pub input: String,
    /// Parser message
    pub reason: String,
}

impl ParseError {
    #[must_use]
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain name not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Form input violates the domain schema
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Date string could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Notification delivery failed
    #[error("Notification error: {0}")]
    NotificationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_) | Self::Validation(_) | Self::Parse(_) => true,
            Self::SerializationError(_) | Self::StorageError(_) | Self::NotificationError(_) => {
                false
            }
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
