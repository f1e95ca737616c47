//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Locked secret memory could not be allocated. There is no unlocked fallback.
    #[error("Secure memory allocation failed: {0}")]
    SecureMemory(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Public key cannot be mapped to the Montgomery curve (weak or malformed point)
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Diffie-Hellman produced the all-zero value (low-order peer key)
    #[error("Key agreement produced a non-contributory shared secret")]
    WeakSharedSecret,

    /// MAC verification failed
    #[error("MAC verification failed")]
    MacVerificationFailed,
}
