//! # WireHub - Endpoints (Subsystem 02)
//!
//! **Bounded Context:** Transport addresses
//!
//! ## Purpose
//!
//! A transport-agnostic IPv4/IPv6 endpoint value and the pure functions the
//! overlay needs around it:
//! - parse and format (`192.0.2.5:51820`, `[2001:db8::1]:51820`)
//! - compact wire packing (`tag ‖ ip ‖ port`)
//! - subnet predicates for local-network detection
//! - ORCHID-style overlay addresses derived from identities
//!
//! The UDP [`adapters::UdpTransport`] is behind the `network` feature; the
//! rest of the crate does no I/O (except name resolution in non-numeric
//! [`parse`]).
//!
//! ## Usage Example
//!
//! ```rust
//! use wh_02_endpoint::{pack, parse, same_subnet, unpack};
//!
//! let a = parse("192.0.2.5:51820", 0, true).unwrap();
//! let b = parse("192.0.2.200", 51820, true).unwrap();
//! assert!(same_subnet(&a, &b, 24).unwrap());
//! assert_eq!(unpack(&pack(&a)).unwrap(), (a, 7));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Adapters for the outbound ports
pub mod adapters;
/// Address value and pure functions over it
pub mod domain;
pub mod ports;

mod error;

pub use domain::{
    derive_orchid, format, is_orchid, pack, pack_into, parse, same_subnet, subnet_id, unpack,
    Address, Family, PACKED_V4_LEN, PACKED_V6_LEN,
};
pub use error::{EndpointError, Result};
pub use ports::{Transport, TransportError};
