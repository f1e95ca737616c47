//! Workbit: the proof-of-work difficulty of a hash.

use shared_crypto::blake2b_256_many;

use crate::{IdentityError, Result};

pub(crate) const WORD: usize = 4;

pub(crate) fn ensure_word_aligned(what: &str, len: usize) -> Result<()> {
    if len % WORD != 0 {
        return Err(IdentityError::InvalidArgument(format!(
            "{what} length {len} is not a multiple of {WORD}"
        )));
    }
    Ok(())
}

/// Leading zero bits of a word-aligned buffer, read as big-endian 32-bit words.
///
/// `words` yields each word; counting stops at the first non-zero one.
pub(crate) fn leading_zero_bits(words: impl Iterator<Item = u32>) -> u32 {
    let mut total = 0;
    for word in words {
        let lz = word.leading_zeros();
        total += lz;
        if lz < 32 {
            break;
        }
    }
    total
}

pub(crate) fn be_words(buf: &[u8]) -> impl Iterator<Item = u32> + '_ {
    buf.chunks_exact(WORD)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
}

/// Count the leading zero bits of `buf`.
///
/// # Errors
///
/// `InvalidArgument` if the length is not a multiple of 4.
pub fn workbit(buf: &[u8]) -> Result<u32> {
    ensure_word_aligned("buffer", buf.len())?;
    Ok(leading_zero_bits(be_words(buf)))
}

/// Workbit of `BLAKE2b-256(dh_public ‖ challenge)`.
///
/// This is the difficulty a key search achieved for `dh_public`, so a peer can
/// check a claimed identity without trusting it.
pub fn key_workbit(dh_public: &[u8; 32], challenge: &[u8]) -> Result<u32> {
    ensure_word_aligned("challenge", challenge.len())?;
    let hash = blake2b_256_many(&[&dh_public[..], challenge]);
    Ok(leading_zero_bits(be_words(&hash)))
}
