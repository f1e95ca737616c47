//! # Shared Crypto - WireHub Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE2b-256 | Workbit hashing, ORCHID derivation |
//! | `mac` | HMAC-SHA512-256 | Control packet authentication |
//! | `dh` | X25519, Ed25519→X25519 map | MAC key agreement |
//! | `signatures` | Ed25519 | Identity keys |
//! | `secret` | mlock + zeroize | Secret key storage |
//!
//! ## Security Properties
//!
//! - **HMAC-SHA512-256**: constant-time tag verification
//! - **X25519**: non-contributory (low-order) results rejected
//! - **SecretBytes**: never swapped, wiped before free, no unlocked fallback

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dh;
pub mod errors;
pub mod hashing;
pub mod mac;
pub mod secret;
pub mod signatures;

// Re-exports
pub use dh::{ed25519_public_to_x25519, ed25519_seed_to_x25519, is_positive, x25519, x25519_base};
pub use errors::CryptoError;
pub use hashing::{blake2b_256, blake2b_256_many, Blake2bHasher, Hash};
pub use mac::{hmac_sha512_256, verify_hmac_sha512_256, Tag, MAC_LEN};
pub use secret::SecretBytes;
pub use signatures::{generate_ed25519, public_from_seed, Ed25519Candidate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
