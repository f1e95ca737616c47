//! # HMAC-SHA512-256
//!
//! HMAC-SHA-512 truncated to its first 32 bytes, the construction libsodium
//! exposes as `crypto_auth_hmacsha512256`. This is not HMAC over the
//! SHA-512/256 hash function; the two produce different tags.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::CryptoError;

/// Tag length in bytes.
pub const MAC_LEN: usize = 32;

/// Authentication tag.
pub type Tag = [u8; MAC_LEN];

type HmacSha512 = Hmac<Sha512>;

fn keyed(key: &[u8; 32]) -> HmacSha512 {
    // HMAC accepts keys of any length.
    <HmacSha512 as Mac>::new_from_slice(key).unwrap_or_else(|_| unreachable!())
}

/// Compute the truncated tag for `message` under `key`.
pub fn hmac_sha512_256(key: &[u8; 32], message: &[u8]) -> Tag {
    let mut mac = keyed(key);
    mac.update(message);
    let full = mac.finalize().into_bytes();

    let mut tag = [0u8; MAC_LEN];
    tag.copy_from_slice(&full[..MAC_LEN]);
    tag
}

/// Verify a truncated tag in constant time.
///
/// # Errors
///
/// Returns `CryptoError::MacVerificationFailed` on mismatch or if `tag` is not
/// exactly [`MAC_LEN`] bytes.
pub fn verify_hmac_sha512_256(key: &[u8; 32], message: &[u8], tag: &[u8]) -> Result<(), CryptoError> {
    if tag.len() != MAC_LEN {
        return Err(CryptoError::MacVerificationFailed);
    }
    let mut mac = keyed(key);
    mac.update(message);
    mac.verify_truncated_left(tag)
        .map_err(|_| CryptoError::MacVerificationFailed)
}
