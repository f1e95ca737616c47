//! # BLAKE2b-256 Hashing
//!
//! Unkeyed BLAKE2b with a 32-byte digest length parameter. This is the same
//! construction as libsodium's `crypto_generichash` with `outlen = 32`, which
//! differs from truncating a BLAKE2b-512 output.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// BLAKE2b-256 hash output.
pub type Hash = [u8; 32];

type Blake2b256 = Blake2b<U32>;

/// Stateful BLAKE2b-256 hasher.
pub struct Blake2bHasher {
    inner: Blake2b256,
}

impl Blake2bHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Blake2b256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        Digest::update(&mut self.inner, data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.finalize());
        out
    }
}

impl Default for Blake2bHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with BLAKE2b-256 (one-shot).
pub fn blake2b_256(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

/// Hash the concatenation of several inputs without building the joined buffer.
pub fn blake2b_256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Blake2bHasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_vector() {
        // BLAKE2b-256("") reference value
        let hash = blake2b_256(b"");
        assert_eq!(
            hex::encode(hash),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_abc_vector() {
        let hash = blake2b_256(b"abc");
        assert_eq!(
            hex::encode(hash),
            "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(blake2b_256(b"test"), blake2b_256(b"test"));
        assert_ne!(blake2b_256(b"input1"), blake2b_256(b"input2"));
    }

    #[test]
    fn test_streaming_matches_oneshot() {
        let oneshot = blake2b_256(b"hello world");

        let mut hasher = Blake2bHasher::new();
        hasher.update(b"hello ").update(b"world");
        assert_eq!(hasher.finalize(), oneshot);

        assert_eq!(blake2b_256_many(&[&b"hello "[..], &b"world"[..]]), oneshot);
    }
}
