//! XOR distance between identities.

use super::workbit::{be_words, ensure_word_aligned, leading_zero_bits};
use crate::{IdentityError, Result};

fn ensure_same_len(a: &[u8], b: &[u8]) -> Result<()> {
    if a.len() != b.len() {
        return Err(IdentityError::InvalidArgument(format!(
            "length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Bucket index between `a` and `b`, or of `a` alone when `b` is `None`.
///
/// The result is `1 + leading zero bits of (a XOR b)`, clamped to `8·len`, so
/// it stays within `[1, 8·len]`. Identical inputs give exactly `8·len`.
///
/// # Properties
/// - Symmetric: `distance(a, Some(b)) == distance(b, Some(a))`
/// - Identical inputs share the same bucket as inputs differing in the last bit
///
/// # Errors
///
/// `InvalidArgument` if the lengths differ, are empty, or are not a multiple of 4.
pub fn distance(a: &[u8], b: Option<&[u8]>) -> Result<u32> {
    ensure_word_aligned("identity", a.len())?;
    if a.is_empty() {
        return Err(IdentityError::InvalidArgument("empty identity".into()));
    }

    let lz = match b {
        Some(b) => {
            ensure_same_len(a, b)?;
            leading_zero_bits(be_words(a).zip(be_words(b)).map(|(x, y)| x ^ y))
        }
        None => leading_zero_bits(be_words(a)),
    };

    let bits = (a.len() * 8) as u32;
    Ok(if lz == bits { bits } else { lz + 1 })
}

/// Byte-wise XOR of two equal-length buffers.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    ensure_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}
