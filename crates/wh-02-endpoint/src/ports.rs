//! # Driven Ports (Outbound SPI)
//!
//! The datagram transport a host provides. The core never performs I/O
//! itself: received `(bytes, Address)` pairs are handed to the packet codec
//! and encoded packets are handed back here.

use thiserror::Error;

use crate::domain::Address;

/// Abstract interface for datagram I/O.
///
/// Both operations are non-blocking and report [`TransportError::WouldBlock`]
/// when the socket is not ready.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
pub trait Transport: Send + Sync {
    /// Send one datagram to `to`.
    fn send(&self, bytes: &[u8], to: &Address) -> Result<(), TransportError>;

    /// Receive one datagram into `buf`, returning its length and sender.
    fn recv(&self, buf: &mut [u8]) -> Result<(usize, Address), TransportError>;
}

/// Errors from transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Socket not ready; retry later
    #[error("operation would block")]
    WouldBlock,

    /// Datagram was only partially sent
    #[error("short send: {sent} of {len} bytes")]
    ShortSend {
        /// Bytes written
        sent: usize,
        /// Datagram length
        len: usize,
    },

    /// Any other socket error
    #[error("transport I/O error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::WouldBlock {
            TransportError::WouldBlock
        } else {
            TransportError::Io(e)
        }
    }
}
