//! Node identity keypair.

use std::fmt;

use shared_crypto::{
    ed25519_public_to_x25519, ed25519_seed_to_x25519, is_positive, public_from_seed, x25519_base,
    SecretBytes,
};

use crate::{IdentityError, Result};

/// An Ed25519 signing pair and the X25519 pair derived from it.
///
/// # Invariants
/// - `signing_public` has its sign bit clear
/// - `dh_public == X25519-base(dh_secret)`
/// - both secrets live in locked, zero-on-drop memory
pub struct KeyPair {
    signing_public: [u8; 32],
    signing_secret: SecretBytes<64>,
    dh_public: [u8; 32],
    dh_secret: SecretBytes<32>,
}

impl KeyPair {
    /// Rebuild a keypair from a 32-byte Ed25519 seed.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the derived signing key is not positive, or a
    /// crypto error if it cannot be mapped to X25519 or locked memory is
    /// unavailable.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self> {
        let signing = public_from_seed(seed);
        if !is_positive(&signing) {
            return Err(IdentityError::InvalidArgument(
                "signing key is not in positive form".into(),
            ));
        }
        let dh_public = ed25519_public_to_x25519(&signing)?;
        let dh_secret = ed25519_seed_to_x25519(seed);

        let mut secret = SecretBytes::<64>::zeroed()?;
        secret.expose_mut()[..32].copy_from_slice(seed);
        secret.expose_mut()[32..].copy_from_slice(&signing);

        Self::from_parts(signing, secret, dh_public, SecretBytes::from_slice(&dh_secret[..])?)
    }

    /// Assemble from already-derived parts, checking the DH invariant.
    pub(crate) fn from_parts(
        signing_public: [u8; 32],
        signing_secret: SecretBytes<64>,
        dh_public: [u8; 32],
        dh_secret: SecretBytes<32>,
    ) -> Result<Self> {
        if x25519_base(dh_secret.expose()) != dh_public {
            return Err(IdentityError::InvalidArgument(
                "dh public key does not match dh secret".into(),
            ));
        }
        Ok(Self {
            signing_public,
            signing_secret,
            dh_public,
            dh_secret,
        })
    }

    /// Ed25519 public key.
    pub fn signing_public(&self) -> &[u8; 32] {
        &self.signing_public
    }

    /// Ed25519 secret in `seed ‖ public` layout.
    pub fn signing_secret(&self) -> &SecretBytes<64> {
        &self.signing_secret
    }

    /// X25519 public key; this is the node's wire identity.
    pub fn dh_public(&self) -> &[u8; 32] {
        &self.dh_public
    }

    /// X25519 secret, used as the MAC key agreement scalar. This is the
    /// value a `SecretStore` persists.
    pub fn dh_secret(&self) -> &SecretBytes<32> {
        &self.dh_secret
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("signing_public", &hex_short(&self.signing_public))
            .field("dh_public", &hex_short(&self.dh_public))
            .finish_non_exhaustive()
    }
}

fn hex_short(bytes: &[u8; 32]) -> String {
    bytes[..8].iter().map(|b| format!("{b:02x}")).collect::<String>() + ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::generate_ed25519;

    fn positive_seed() -> [u8; 32] {
        loop {
            let c = generate_ed25519();
            if is_positive(&c.public) {
                return *c.seed();
            }
        }
    }

    #[test]
    fn test_from_seed_upholds_invariants() {
        let seed = positive_seed();
        let kp = KeyPair::from_seed(&seed).unwrap();

        assert!(is_positive(kp.signing_public()));
        assert_eq!(x25519_base(kp.dh_secret().expose()), *kp.dh_public());
        assert_eq!(&kp.signing_secret().expose()[32..], kp.signing_public());
        assert_eq!(&kp.signing_secret().expose()[..32], &seed);
    }

    #[test]
    fn test_negative_seed_rejected() {
        let seed = loop {
            let c = generate_ed25519();
            if !is_positive(&c.public) {
                break *c.seed();
            }
        };
        assert!(matches!(
            KeyPair::from_seed(&seed),
            Err(IdentityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mismatched_parts_rejected() {
        let kp = KeyPair::from_seed(&positive_seed()).unwrap();
        let result = KeyPair::from_parts(
            *kp.signing_public(),
            kp.signing_secret().try_clone().unwrap(),
            [9u8; 32],
            kp.dh_secret().try_clone().unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let kp = KeyPair::from_seed(&positive_seed()).unwrap();
        let shown = format!("{kp:?}");
        assert!(shown.starts_with("KeyPair"));
        assert!(!shown.contains("signing_secret"));
    }
}
