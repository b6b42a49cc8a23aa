//! Error types for the ownership module.

use rootrelay_core::Address;
use thiserror::Error;

/// Errors that can occur during ownership operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// Caller is not the current owner.
    #[error("caller {caller} is not the owner")]
    NotOwner { caller: Address },

    /// Caller is not the pending owner, or no transfer is pending.
    #[error("caller {caller} is not the pending owner")]
    NotPendingOwner { caller: Address },

    /// Ownership can never be renounced.
    #[error("ownership cannot be renounced (attempted by {caller})")]
    RenounceForbidden { caller: Address },

    /// The zero address can't own anything.
    #[error("invalid owner candidate: {0}")]
    InvalidCandidate(Address),
}

/// Result type for ownership operations.
pub type Result<T> = std::result::Result<T, OwnershipError>;
