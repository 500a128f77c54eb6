//! Errors raised before anything reaches the network.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Local input failure. Service and transport failures live in
/// `shopfront_client::ApiError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form field did not parse or is out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An id typed by the user is not an integer.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
