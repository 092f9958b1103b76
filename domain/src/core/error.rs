//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant is the caller's fault: the request never leaves the
/// process when one of these is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("Field must be a string: {0}")]
    NotAString(&'static str),

    #[error("Request body must be a JSON object")]
    NotAnObject,
}

impl DomainError {
    /// Name of the offending field, if the error concerns a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::MissingField(name)
            | DomainError::EmptyField(name)
            | DomainError::NotAString(name) => Some(name),
            DomainError::NotAnObject => None,
        }
    }
}
