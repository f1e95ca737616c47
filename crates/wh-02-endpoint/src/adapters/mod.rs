//! Adapters for the endpoint ports.

#[cfg(feature = "network")]
pub mod udp;

#[cfg(feature = "network")]
pub use udp::UdpTransport;
