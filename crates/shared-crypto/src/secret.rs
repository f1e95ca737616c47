//! # Locked Secret Memory
//!
//! [`SecretBytes`] holds key material in its own page-aligned allocation that
//! is `mlock`ed for its whole lifetime, so it never reaches swap, and is wiped
//! with [`zeroize`] before being unlocked and freed.
//!
//! Each secret owns whole pages. Sharing a page between two secrets would let
//! the `munlock` of one drop the lock of the other.

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;
use std::sync::OnceLock;

use zeroize::Zeroize;

use crate::CryptoError;

fn page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();
    *PAGE_SIZE.get_or_init(|| {
        // SAFETY: sysconf has no memory-safety preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 {
            size as usize
        } else {
            4096
        }
    })
}

/// Fixed-size secret buffer in non-swappable, zero-on-drop memory.
pub struct SecretBytes<const N: usize> {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: the allocation is uniquely owned; access goes through &self / &mut self.
unsafe impl<const N: usize> Send for SecretBytes<N> {}
unsafe impl<const N: usize> Sync for SecretBytes<N> {}

impl<const N: usize> SecretBytes<N> {
    /// Allocate a zero-filled locked buffer.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SecureMemory` if the pages cannot be allocated or
    /// locked.
    pub fn zeroed() -> Result<Self, CryptoError> {
        let page = page_size();
        let size = N.max(1).div_ceil(page) * page;
        let layout = Layout::from_size_align(size, page)
            .map_err(|e| CryptoError::SecureMemory(e.to_string()))?;

        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| CryptoError::SecureMemory("allocation failed".into()))?;

        // SAFETY: ptr points to `size` bytes owned by us.
        if unsafe { libc::mlock(ptr.as_ptr().cast(), size) } != 0 {
            let err = std::io::Error::last_os_error();
            // SAFETY: allocated above with the same layout, never handed out.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
            return Err(CryptoError::SecureMemory(format!("mlock: {err}")));
        }

        Ok(Self { ptr, layout })
    }

    /// Allocate a locked buffer and copy `bytes` into it.
    ///
    /// The caller is responsible for wiping its own copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != N {
            return Err(CryptoError::InvalidKeyLength {
                expected: N,
                actual: bytes.len(),
            });
        }
        let mut secret = Self::zeroed()?;
        secret.expose_mut().copy_from_slice(bytes);
        Ok(secret)
    }

    /// Move an array into locked memory, wiping the source.
    pub fn from_array(mut bytes: [u8; N]) -> Result<Self, CryptoError> {
        let result = Self::from_slice(&bytes);
        bytes.zeroize();
        result
    }

    /// Borrow the secret bytes.
    pub fn expose(&self) -> &[u8; N] {
        // SAFETY: the allocation holds at least N initialized bytes and is
        // aligned to a page, which satisfies the alignment of [u8; N].
        unsafe { &*self.ptr.as_ptr().cast::<[u8; N]>() }
    }

    /// Mutably borrow the secret bytes.
    pub fn expose_mut(&mut self) -> &mut [u8; N] {
        // SAFETY: see `expose`; &mut self guarantees exclusivity.
        unsafe { &mut *self.ptr.as_ptr().cast::<[u8; N]>() }
    }

    /// Copy into a fresh locked allocation.
    pub fn try_clone(&self) -> Result<Self, CryptoError> {
        Self::from_slice(self.expose())
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    /// Constant-time comparison.
    fn eq(&self, other: &Self) -> bool {
        let mut diff = 0u8;
        for (a, b) in self.expose().iter().zip(other.expose().iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> Drop for SecretBytes<N> {
    fn drop(&mut self) {
        // SAFETY: ptr/layout come from `zeroed`; the region is exclusively ours.
        unsafe {
            let region = std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size());
            region.zeroize();
            libc::munlock(self.ptr.as_ptr().cast(), self.layout.size());
            alloc::dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_is_zero() {
        let secret = SecretBytes::<32>::zeroed().unwrap();
        assert_eq!(secret.expose(), &[0u8; 32]);
    }

    #[test]
    fn test_from_slice_roundtrip() {
        let secret = SecretBytes::<4>::from_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(secret.expose(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let result = SecretBytes::<32>::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn test_page_aligned() {
        let secret = SecretBytes::<64>::zeroed().unwrap();
        assert_eq!(secret.ptr.as_ptr() as usize % page_size(), 0);
    }

    #[test]
    fn test_debug_redacts() {
        let secret = SecretBytes::<4>::from_array([0xAB; 4]).unwrap();
        let shown = format!("{secret:?}");
        assert!(!shown.contains("171"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut a = SecretBytes::<8>::from_array([7u8; 8]).unwrap();
        let b = a.try_clone().unwrap();
        a.expose_mut()[0] = 0;
        assert_eq!(b.expose()[0], 7);
        assert_ne!(a, b);
    }
}
