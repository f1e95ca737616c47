//! Compact wire encoding of an [`Address`]: `tag ‖ ip ‖ port(BE)`.

use super::address::Address;
use crate::{EndpointError, Result};

/// Tag byte of a packed IPv4 address.
pub const TAG_V4: u8 = 0x04;
/// Tag byte of a packed IPv6 address.
pub const TAG_V6: u8 = 0x06;
/// Packed IPv4 length.
pub const PACKED_V4_LEN: usize = 1 + 4 + 2;
/// Packed IPv6 length.
pub const PACKED_V6_LEN: usize = 1 + 16 + 2;

/// Append the packed form of `addr` to `out`.
pub fn pack_into(addr: &Address, out: &mut Vec<u8>) {
    match addr {
        Address::V4 { ip, port } => {
            out.push(TAG_V4);
            out.extend_from_slice(ip);
            out.extend_from_slice(&port.to_be_bytes());
        }
        Address::V6 { ip, port } => {
            out.push(TAG_V6);
            out.extend_from_slice(ip);
            out.extend_from_slice(&port.to_be_bytes());
        }
    }
}

/// Packed form of `addr` (7 or 19 bytes).
pub fn pack(addr: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(PACKED_V6_LEN);
    pack_into(addr, &mut out);
    out
}

/// Decode one packed address from the front of `bytes`.
///
/// Returns the address and the number of bytes consumed; trailing bytes are
/// left for the caller, so several addresses can be read back to back.
///
/// # Errors
///
/// `Malformed` on empty input, an unknown tag or a truncated body.
pub fn unpack(bytes: &[u8]) -> Result<(Address, usize)> {
    let (&tag, rest) = bytes
        .split_first()
        .ok_or_else(|| EndpointError::Malformed("empty input".into()))?;

    let need = match tag {
        TAG_V4 => PACKED_V4_LEN,
        TAG_V6 => PACKED_V6_LEN,
        other => return Err(EndpointError::Malformed(format!("unknown tag {other:#04x}"))),
    };
    if bytes.len() < need {
        return Err(EndpointError::Malformed(format!(
            "truncated: need {need} bytes, got {}",
            bytes.len()
        )));
    }

    let ip_len = need - 3;
    let port = u16::from_be_bytes([rest[ip_len], rest[ip_len + 1]]);
    let addr = if tag == TAG_V4 {
        let mut ip = [0u8; 4];
        ip.copy_from_slice(&rest[..4]);
        Address::V4 { ip, port }
    } else {
        let mut ip = [0u8; 16];
        ip.copy_from_slice(&rest[..16]);
        Address::V6 { ip, port }
    };
    Ok((addr, need))
}
