//! # WireHub - Control Packets (Subsystem 03)
//!
//! **Bounded Context:** Authenticated control signaling
//!
//! ## Purpose
//!
//! Small control datagrams between nodes, authenticated without a third
//! party: both ends derive the same MAC key from X25519, so a valid tag
//! proves the packet came from the holder of the claimed sender key.
//!
//! ## Security Properties
//!
//! - **Authenticity**: any single-bit change is rejected
//! - **Constant-time** tag comparison
//! - **No confidentiality**: the body travels in the clear
//! - **No replay window**: callers check `timestamp` themselves
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use wh_03_packet::{open, peek_sender, seal};
//!
//! let alice = wh_01_identity::search(b"", 0, 1).unwrap();
//! let bob = wh_01_identity::search(b"", 0, 1).unwrap();
//!
//! let packet = seal(&alice, bob.dh_public(), false, b"ping").unwrap();
//! assert_eq!(&peek_sender(&packet).unwrap(), alice.dh_public());
//! assert_eq!(open(&bob, &packet).unwrap().body, b"ping");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod flags;

mod error;

pub use codec::{
    decode, encode, now_seconds, open, peek_sender, seal, DecodedPacket, MAGIC, MIN_PACKET_LEN,
};
pub use error::{PacketError, Result};
pub use flags::FlagsTime;
