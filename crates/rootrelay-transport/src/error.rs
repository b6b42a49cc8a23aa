//! Error types for the collaborator ports.

use rootrelay_core::CodecError;
use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport refused the message.
    #[error("dispatch rejected: {0}")]
    Rejected(String),

    /// The transport is no longer reachable.
    #[error("transport disconnected: {0}")]
    Disconnected(String),

    /// The message could not be framed for the transport.
    #[error("encoding error: {0}")]
    Encoding(#[from] CodecError),
}

/// Errors raised while reading the current root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source of truth could not be queried.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with something that is not a root.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
