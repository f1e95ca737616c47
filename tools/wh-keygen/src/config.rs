//! Configuration file for `wh-keygen`.
//!
//! ```toml
//! [keysearch]
//! workbit = 12
//! workers = 0
//! timeout_secs = 600
//! progress_secs = 5
//!
//! [identity]
//! challenge = "wire"
//! secret_key = "~/.wirehub/wh.sk"
//! orchid_context = "wirehub"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use wh_01_identity::KeySearchConfig;

/// Whole configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub keysearch: KeySearchConfig,
    pub identity: IdentityConfig,
}

/// `[identity]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Proof-of-work challenge, usually the network name
    pub challenge: String,
    /// Where the X25519 secret is written
    pub secret_key: Option<PathBuf>,
    /// Context mixed into the ORCHID address
    pub orchid_context: String,
}

impl ToolConfig {
    /// Read `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
