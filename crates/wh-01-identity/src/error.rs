//! Error types for the identity subsystem

use std::time::Duration;

use shared_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for identity operations
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors that can occur during identity operations
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Caller-supplied value failed validation (misaligned or mismatched buffers)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stored secret could not be decoded
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A search worker thread could not be spawned
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Key search did not finish within its deadline
    #[error("Key search timed out after {0:?}")]
    Timeout(Duration),

    /// Key search was cancelled through its token
    #[error("Key search cancelled")]
    Cancelled,

    /// Underlying cryptographic failure (including locked memory allocation)
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Secret store I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
