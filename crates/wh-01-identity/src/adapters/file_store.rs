//! Base64 secret key files.
//!
//! One line of standard (padded) base64 holding the 32-byte X25519 secret,
//! the same layout WireGuard uses for private keys.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_crypto::SecretBytes;
use tracing::debug;
use zeroize::Zeroizing;

use crate::ports::SecretStore;
use crate::{IdentityError, Result};

/// [`SecretStore`] backed by files on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSecretStore {
    home: Option<PathBuf>,
}

impl FileSecretStore {
    /// Store expanding `~` from `$HOME`.
    pub fn new() -> Self {
        Self {
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// Store expanding `~` from an explicit directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Replace a leading `~` component with the home directory.
    pub fn expand(&self, path: &Path) -> PathBuf {
        match (&self.home, path.strip_prefix("~")) {
            (Some(home), Ok(rest)) => home.join(rest),
            _ => path.to_path_buf(),
        }
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self, path: &Path) -> Result<Option<SecretBytes<32>>> {
        let path = self.expand(path);
        let text = match fs::read(&path) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No secret key at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let decoded = STANDARD
            .decode(text.trim_ascii())
            .map(Zeroizing::new)
            .map_err(|e| IdentityError::InvalidFormat(format!("{}: {e}", path.display())))?;

        let secret = SecretBytes::from_slice(&decoded).map_err(|_| {
            IdentityError::InvalidFormat(format!(
                "{}: expected 32-byte key, got {} bytes",
                path.display(),
                decoded.len()
            ))
        })?;
        Ok(Some(secret))
    }

    fn save(&self, path: &Path, secret: &SecretBytes<32>) -> Result<()> {
        let path = self.expand(path);
        let mut line = Zeroizing::new(STANDARD.encode(secret.expose()));
        line.push('\n');

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path)?;
        // `mode` only applies on create; an existing file keeps its bits.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        debug!("Saved secret key to {}", path.display());
        Ok(())
    }
}
