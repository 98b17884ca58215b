//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Every failure
/// raised by an account itself is an [`DomainError::InvalidAmount`]; the other
/// variants only appear at the identifier and adapter boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An amount or limit violated a precondition (non-positive amount,
    /// insufficient funds, ceiling breach, forbidden overdraw, ...).
    ///
    /// Always recoverable: the account is left untouched.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested account was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. an account number is already taken).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether the caller can retry with corrected input.
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_amount_carries_reason() {
        let err = DomainError::invalid_amount("deposit amount must be positive");
        assert!(err.is_invalid_amount());
        assert_eq!(
            err.to_string(),
            "invalid amount: deposit amount must be positive"
        );
    }

    #[test]
    fn boundary_errors_are_not_amount_errors() {
        assert!(!DomainError::not_found().is_invalid_amount());
        assert!(!DomainError::conflict("taken").is_invalid_amount());
        assert!(!DomainError::invalid_id("blank").is_invalid_amount());
    }
}
