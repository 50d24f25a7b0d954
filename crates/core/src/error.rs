//! Domain error model.

use thiserror::Error;

use crate::id::IdError;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (validation,
/// uniqueness, lookups). Mapping to transport status codes belongs to the
/// excluded web layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (parse failure at the boundary).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Identifier generation could not draw entropy. Fatal at the call site;
    /// never occurs in a correctly provisioned environment.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// A requested resource was not found (or is deactivated).
    #[error("not found")]
    NotFound,

    /// A uniqueness conflict (e.g. email already registered).
    #[error("duplicate entity: {0}")]
    Duplicate(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<IdError> for DomainError {
    fn from(err: IdError) -> Self {
        match err {
            IdError::InvalidFormat(msg) => Self::InvalidId(msg),
            IdError::EntropyUnavailable(msg) => Self::EntropyUnavailable(msg),
        }
    }
}
