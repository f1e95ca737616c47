//! ORCHID-style self-certifying IPv6 addresses.
//!
//! `BLAKE2b-256(content_id ‖ context)` truncated to its first 128 bits and
//! stamped with the `2001:1x` prefix. The hash is cut by prefix, not by the
//! middle-bits extraction of RFC 7343, so these addresses are only
//! ORCHID-shaped.

use shared_crypto::blake2b_256_many;

use super::address::Address;

/// Derive the overlay IPv6 address of `content_id` within `context`.
pub fn derive(content_id: &[u8], context: &[u8], port: u16) -> Address {
    let hash = blake2b_256_many(&[content_id, context]);

    let mut ip = [0u8; 16];
    ip.copy_from_slice(&hash[..16]);
    ip[0] = 0x20;
    ip[1] = 0x01;
    ip[2] = (ip[2] & 0x0F) | 0x10;

    Address::V6 { ip, port }
}

/// Whether `addr` carries the prefix [`derive`] stamps.
pub fn is_orchid(addr: &Address) -> bool {
    match addr {
        Address::V6 { ip, .. } => ip[0] == 0x20 && ip[1] == 0x01 && ip[2] & 0xF0 == 0x10,
        Address::V4 { .. } => false,
    }
}
