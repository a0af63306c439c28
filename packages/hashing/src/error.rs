//! Error handling for the outer hashing layers
//!
//! The MurmurHash3 core is total and never fails; these errors only come from
//! the async, streaming and digest-decoding surfaces.

use thiserror::Error;

/// Hashing-specific errors
#[derive(Debug, Error)]
pub enum HashError {
    /// A computation finished without producing a hash
    #[error("Hash computation error: {0}")]
    HashComputation(String),

    /// A textual digest could not be decoded into a 32-bit hash
    #[error("Invalid hash encoding: {0}")]
    InvalidEncoding(String),

    /// Internal failure, e.g. a computation task dropped its sender
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HashError {
    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an `invalid_encoding` error
    #[must_use]
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }
}

impl From<hex::FromHexError> for HashError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidEncoding(err.to_string())
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
