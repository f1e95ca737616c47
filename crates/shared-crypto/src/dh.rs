//! # X25519 Key Agreement
//!
//! Identities sign with Ed25519 and agree on MAC keys with X25519. The DH pair
//! is never generated on its own; it is derived from the signing pair through
//! the Edwards to Montgomery birational map, so one identity key covers both.
//!
//! - Public: `u = (1 + y) / (1 - y)` via `VerifyingKey::to_montgomery`.
//! - Secret: first half of `SHA-512(seed)`, clamped.

use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha512};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use crate::CryptoError;

/// `true` when the sign bit of an encoded Ed25519 point is clear.
pub fn is_positive(ed25519_public: &[u8; 32]) -> bool {
    ed25519_public[31] & 0x80 == 0
}

/// Map an Ed25519 public key onto the Montgomery curve.
///
/// # Errors
///
/// `InvalidPublicKey` if the bytes do not decode to a curve point or the
/// point has small order.
pub fn ed25519_public_to_x25519(ed25519_public: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let point = VerifyingKey::from_bytes(ed25519_public).map_err(|_| CryptoError::InvalidPublicKey)?;
    if point.is_weak() {
        return Err(CryptoError::InvalidPublicKey);
    }
    Ok(point.to_montgomery().to_bytes())
}

/// Derive the X25519 scalar that matches `ed25519_public_to_x25519` for the
/// same signing seed.
pub fn ed25519_seed_to_x25519(seed: &[u8; 32]) -> Zeroizing<[u8; 32]> {
    let mut digest = Sha512::digest(seed);

    let mut scalar = Zeroizing::new([0u8; 32]);
    scalar.copy_from_slice(&digest[..32]);
    digest.as_mut_slice().zeroize();

    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}

/// Public key for an X25519 secret (scalar multiplication by the base point).
pub fn x25519_base(secret: &[u8; 32]) -> [u8; 32] {
    let secret = StaticSecret::from(*secret);
    PublicKey::from(&secret).to_bytes()
}

/// X25519 key agreement.
///
/// # Errors
///
/// `WeakSharedSecret` if the peer key has low order and the result is the
/// all-zero value.
pub fn x25519(secret: &[u8; 32], peer_public: &[u8; 32]) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let secret = StaticSecret::from(*secret);
    let shared = secret.diffie_hellman(&PublicKey::from(*peer_public));
    if !shared.was_contributory() {
        return Err(CryptoError::WeakSharedSecret);
    }
    Ok(Zeroizing::new(*shared.as_bytes()))
}
