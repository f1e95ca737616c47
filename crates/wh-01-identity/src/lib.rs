//! # WireHub - Identity (Subsystem 01)
//!
//! **Bounded Context:** Node identities
//!
//! ## Purpose
//!
//! A WireHub node is identified by the X25519 public key derived from an
//! Ed25519 signing key. Identities are not free: a key is only accepted if
//! `BLAKE2b-256(dh_public ‖ challenge)` starts with enough zero bits (its
//! *workbit*), which makes flooding the overlay with identities expensive.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - FileSecretStore: base64 key files                │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports / Service (Middle)                           │
//! │  - SecretStore                                      │
//! │  - KeySearch: threaded proof-of-work search         │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - workbit, key_workbit                             │
//! │  - distance, xor                                    │
//! │  - KeyPair                                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use wh_01_identity::{distance, KeySearch, KeySearchConfig};
//!
//! let outcome = KeySearch::new(KeySearchConfig::new(8, 0)).run(b"wire").unwrap();
//! let me = outcome.keypair.dh_public();
//! assert_eq!(distance(me, Some(&me[..])).unwrap(), 256);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Adapters for the outbound ports
pub mod adapters;
/// Pure identity primitives
pub mod domain;
pub mod ports;
/// Key search
pub mod service;

mod config;
mod error;

pub use adapters::FileSecretStore;
pub use config::{KeySearchConfig, DEFAULT_WORKBIT};
pub use domain::{distance, key_workbit, workbit, xor, KeyPair};
pub use error::{IdentityError, Result};
pub use ports::SecretStore;
pub use service::{search, CancelToken, KeySearch, SearchOutcome, MAX_WORKBIT};
