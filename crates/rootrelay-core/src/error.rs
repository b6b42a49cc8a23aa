//! Error types for rootrelay core.

use thiserror::Error;

/// Errors from parsing identities and decoding remote call payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unknown selector: 0x{0}")]
    UnknownSelector(String),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("address word has non-zero padding")]
    InvalidAddressPadding,

    #[error("bool word is neither 0 nor 1")]
    InvalidBool,

    #[error("word does not fit in {0}")]
    Overflow(&'static str),

    #[error("invalid dynamic offset: {0}")]
    InvalidOffset(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
