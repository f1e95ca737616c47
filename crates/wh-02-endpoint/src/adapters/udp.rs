//! Non-blocking UDP transport.

use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

use tracing::trace;

use crate::domain::Address;
use crate::ports::{Transport, TransportError};

/// [`Transport`] over a non-blocking `std::net::UdpSocket`.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
}

impl UdpTransport {
    /// Bind to a local address and switch the socket to non-blocking mode.
    ///
    /// # Errors
    ///
    /// Returns error if socket binding fails.
    pub fn bind(local: &Address) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(SocketAddr::from(*local)).map_err(TransportError::Io)?;
        socket.set_nonblocking(true).map_err(TransportError::Io)?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    /// Get the local address the socket is bound to.
    pub fn local_address(&self) -> Result<Address, TransportError> {
        Ok(self.socket.local_addr()?.into())
    }
}

impl Transport for UdpTransport {
    fn send(&self, bytes: &[u8], to: &Address) -> Result<(), TransportError> {
        let sent = self.socket.send_to(bytes, SocketAddr::from(*to))?;
        if sent != bytes.len() {
            return Err(TransportError::ShortSend {
                sent,
                len: bytes.len(),
            });
        }
        trace!("sent {} bytes to {}", sent, to);
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<(usize, Address), TransportError> {
        let (len, from) = self.socket.recv_from(buf)?;
        trace!("received {} bytes from {}", len, from);
        Ok((len, from.into()))
    }
}
