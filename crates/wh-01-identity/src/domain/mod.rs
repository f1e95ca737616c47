//! Domain Layer - identity primitives with no I/O
//!
//! - Workbit (leading zero bits) of hashes and keys
//! - XOR bucket distance between identities
//! - The node keypair

pub mod distance;
pub mod keypair;
pub mod workbit;

pub use distance::{distance, xor};
pub use keypair::KeyPair;
pub use workbit::{key_workbit, workbit};
