//! Error types for the packet codec

use thiserror::Error;

/// Result type alias for packet operations
pub type Result<T> = std::result::Result<T, PacketError>;

/// Errors that can occur while building or opening a control packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Undersized packet or wrong magic
    #[error("Malformed packet: {0}")]
    Malformed(String),

    /// MAC mismatch or unusable sender key; the two are not distinguished
    #[error("Packet authentication failed")]
    Unauthenticated,

    /// Key agreement with the recipient key failed (low-order key)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller-supplied field out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
