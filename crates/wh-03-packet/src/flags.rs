//! The 8-byte `flagsTime` header field.
//!
//! Big-endian `u64`: bit 63 is the NATed flag, bits 0-62 the sender's Unix
//! timestamp in seconds.

use crate::{PacketError, Result};

/// Bit set when the sender is behind a NAT.
pub const NATED_BIT: u64 = 1 << 63;

/// Bits available to the timestamp.
pub const TIME_MASK: u64 = u64::MAX >> 1;

/// Decoded `flagsTime` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagsTime {
    /// Sender is behind a NAT
    pub nated: bool,
    /// Unix timestamp in seconds (63 bits)
    pub timestamp: u64,
}

impl FlagsTime {
    /// Validate and build.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `timestamp` does not fit in 63 bits.
    pub fn new(nated: bool, timestamp: u64) -> Result<Self> {
        if timestamp > TIME_MASK {
            return Err(PacketError::InvalidArgument(format!(
                "timestamp {timestamp} exceeds 63 bits"
            )));
        }
        Ok(Self { nated, timestamp })
    }

    /// Wire form.
    pub fn to_bytes(self) -> [u8; 8] {
        let nated = if self.nated { NATED_BIT } else { 0 };
        (nated | (self.timestamp & TIME_MASK)).to_be_bytes()
    }

    /// Parse the wire form. Every 8-byte value is valid.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        let raw = u64::from_be_bytes(bytes);
        Self {
            nated: raw & NATED_BIT != 0,
            timestamp: raw & TIME_MASK,
        }
    }
}
