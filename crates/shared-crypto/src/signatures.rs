//! # Ed25519 Identity Keys
//!
//! Raw-byte helpers around `ed25519-dalek`. The 64-byte secret is the
//! `seed ‖ public` layout kept inside `KeyPair`.

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// Freshly generated signing pair. The signing key is wiped on drop.
pub struct Ed25519Candidate {
    /// Compressed Edwards public key.
    pub public: [u8; 32],
    signing: SigningKey,
}

impl Ed25519Candidate {
    /// The 32-byte seed.
    pub fn seed(&self) -> &[u8; 32] {
        self.signing.as_bytes()
    }

    /// `seed ‖ public`.
    pub fn secret(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.signing.to_keypair_bytes())
    }
}

/// Generate a random signing pair from the OS RNG.
pub fn generate_ed25519() -> Ed25519Candidate {
    let signing = SigningKey::generate(&mut rand::rngs::OsRng);
    Ed25519Candidate {
        public: signing.verifying_key().to_bytes(),
        signing,
    }
}

/// Public key for a 32-byte seed.
pub fn public_from_seed(seed: &[u8; 32]) -> [u8; 32] {
    SigningKey::from_bytes(seed).verifying_key().to_bytes()
}
