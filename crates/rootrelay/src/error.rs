//! Error types for the relay.

use std::fmt;

use rootrelay_core::Address;
use rootrelay_ownership::OwnershipError;
use rootrelay_transport::{SourceError, TransportError};
use thiserror::Error;

/// The identity an operation was gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    PendingOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => f.write_str("owner"),
            Role::PendingOwner => f.write_str("pending owner"),
        }
    }
}

/// Errors that can occur during relay operations.
///
/// Every error aborts the operation with no state change and no audit
/// record.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller does not hold the role the operation requires.
    #[error("unauthorized: {caller} is not the {required}")]
    Unauthorized { caller: Address, required: Role },

    /// The operation would break a relay invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The cross-domain dispatch failed.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// Reading the current root failed.
    #[error("upstream read failure: {0}")]
    UpstreamReadFailure(#[from] SourceError),

    /// An argument can never be valid for this operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Construction input is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<OwnershipError> for RelayError {
    fn from(e: OwnershipError) -> Self {
        match e {
            OwnershipError::NotOwner { caller } => RelayError::Unauthorized {
                caller,
                required: Role::Owner,
            },
            OwnershipError::NotPendingOwner { caller } => RelayError::Unauthorized {
                caller,
                required: Role::PendingOwner,
            },
            OwnershipError::RenounceForbidden { .. } => {
                RelayError::InvariantViolation("ownership cannot be renounced".into())
            }
            OwnershipError::InvalidCandidate(address) => {
                RelayError::InvalidArgument(format!("{address} cannot be an owner"))
            }
        }
    }
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
