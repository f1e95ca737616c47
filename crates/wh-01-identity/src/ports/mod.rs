//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the identity subsystem requires from its host.

use std::path::Path;

use shared_crypto::SecretBytes;

use crate::Result;

/// Persistent storage for a node's 32-byte X25519 secret.
///
/// Implementations must be `Send + Sync` so a store can be shared between
/// the control loop and key management.
pub trait SecretStore: Send + Sync {
    /// Load the secret at `path`. A missing secret is `Ok(None)`, not an error.
    fn load(&self, path: &Path) -> Result<Option<SecretBytes<32>>>;

    /// Persist `secret` at `path`, replacing any previous value.
    fn save(&self, path: &Path, secret: &SecretBytes<32>) -> Result<()>;
}
