//! # Control Packet Codec
//!
//! ```text
//! offset  0       4                 36          44          44+n
//!         ┌───────┬─────────────────┬───────────┬───────────┬──────────┐
//!         │ magic │ sender X25519   │ flagsTime │ body (n)  │ mac (32) │
//!         └───────┴─────────────────┴───────────┴───────────┴──────────┘
//! ```
//!
//! `mac = HMAC-SHA512-256(X25519(secret, peer), magic ‖ sender ‖ flagsTime ‖ body)`.
//! Packets are authenticated, not encrypted. Replay and clock-skew checks on
//! the timestamp are left to the caller.

use std::time::{SystemTime, UNIX_EPOCH};

use shared_crypto::{hmac_sha512_256, verify_hmac_sha512_256, x25519, SecretBytes, MAC_LEN};
use tracing::{debug, warn};
use wh_01_identity::KeyPair;

use crate::flags::FlagsTime;
use crate::{PacketError, Result};

/// Fixed first four bytes of every control packet.
pub const MAGIC: [u8; 4] = [0xFF, 0x00, 0x00, 0x00];

/// Offset of the sender's X25519 public key.
pub const SENDER_OFFSET: usize = 4;
/// Offset of the `flagsTime` field.
pub const FLAGS_TIME_OFFSET: usize = SENDER_OFFSET + 32;
/// Offset of the body.
pub const BODY_OFFSET: usize = FLAGS_TIME_OFFSET + 8;
/// Size of a packet with an empty body.
pub const MIN_PACKET_LEN: usize = BODY_OFFSET + MAC_LEN;

/// Fields of an authenticated packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    /// Sender's X25519 public key
    pub sender: [u8; 32],
    /// Sender reported being behind a NAT
    pub nated: bool,
    /// Sender's Unix timestamp in seconds
    pub timestamp: u64,
    /// Application payload
    pub body: Vec<u8>,
}

/// Build an authenticated packet from `sender` to `recipient`.
///
/// # Errors
///
/// - `InvalidArgument`: `timestamp` does not fit in 63 bits
/// - `InvalidState`: key agreement with `recipient_dh_public` failed
pub fn encode(
    sender_secret: &SecretBytes<32>,
    sender_dh_public: &[u8; 32],
    recipient_dh_public: &[u8; 32],
    nated: bool,
    timestamp: u64,
    body: &[u8],
) -> Result<Vec<u8>> {
    let flags = FlagsTime::new(nated, timestamp)?;
    let shared = x25519(sender_secret.expose(), recipient_dh_public)
        .map_err(|e| PacketError::InvalidState(e.to_string()))?;

    let mut packet = Vec::with_capacity(MIN_PACKET_LEN + body.len());
    packet.extend_from_slice(&MAGIC);
    packet.extend_from_slice(sender_dh_public);
    packet.extend_from_slice(&flags.to_bytes());
    packet.extend_from_slice(body);

    let mac = hmac_sha512_256(&shared, &packet);
    packet.extend_from_slice(&mac);
    Ok(packet)
}

fn check_frame(bytes: &[u8]) -> Result<()> {
    if bytes.len() < MIN_PACKET_LEN {
        return Err(PacketError::Malformed(format!(
            "{} bytes, need at least {MIN_PACKET_LEN}",
            bytes.len()
        )));
    }
    if bytes[..SENDER_OFFSET] != MAGIC {
        return Err(PacketError::Malformed("bad magic".into()));
    }
    Ok(())
}

fn sender_of(bytes: &[u8]) -> [u8; 32] {
    let mut sender = [0u8; 32];
    sender.copy_from_slice(&bytes[SENDER_OFFSET..FLAGS_TIME_OFFSET]);
    sender
}

/// Sender key of a packet that passes the size and magic checks.
///
/// The key is **not** authenticated; use it only to pick which secret or
/// peer to hand the packet to before calling [`decode`].
pub fn peek_sender(bytes: &[u8]) -> Result<[u8; 32]> {
    check_frame(bytes)?;
    Ok(sender_of(bytes))
}

/// Verify and open a packet addressed to `recipient_secret`.
///
/// # Errors
///
/// - `Malformed`: shorter than [`MIN_PACKET_LEN`] or wrong magic
/// - `Unauthenticated`: MAC mismatch or unusable sender key
pub fn decode(recipient_secret: &SecretBytes<32>, bytes: &[u8]) -> Result<DecodedPacket> {
    check_frame(bytes)?;
    let sender = sender_of(bytes);

    let shared = x25519(recipient_secret.expose(), &sender).map_err(|e| {
        debug!("Rejecting packet: {}", e);
        PacketError::Unauthenticated
    })?;

    let mac_offset = bytes.len() - MAC_LEN;
    verify_hmac_sha512_256(&shared, &bytes[..mac_offset], &bytes[mac_offset..]).map_err(|_| {
        debug!("Rejecting packet: MAC mismatch ({} bytes)", bytes.len());
        PacketError::Unauthenticated
    })?;

    let mut flags = [0u8; 8];
    flags.copy_from_slice(&bytes[FLAGS_TIME_OFFSET..BODY_OFFSET]);
    let flags = FlagsTime::from_bytes(flags);

    Ok(DecodedPacket {
        sender,
        nated: flags.nated,
        timestamp: flags.timestamp,
        body: bytes[BODY_OFFSET..mac_offset].to_vec(),
    })
}

/// Current Unix time in seconds, or 0 when the clock reads before the epoch.
pub fn now_seconds() -> u64 {
    seconds_since_epoch(SystemTime::now())
}

fn seconds_since_epoch(at: SystemTime) -> u64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(e) => {
            warn!(
                "System clock is {:?} before the Unix epoch; stamping packets with 0",
                e.duration()
            );
            0
        }
    }
}

/// [`encode`] from `keypair`, stamped with the current time.
pub fn seal(keypair: &KeyPair, recipient: &[u8; 32], nated: bool, body: &[u8]) -> Result<Vec<u8>> {
    encode(
        keypair.dh_secret(),
        keypair.dh_public(),
        recipient,
        nated,
        now_seconds(),
        body,
    )
}

/// [`decode`] with `keypair`'s DH secret.
pub fn open(keypair: &KeyPair, bytes: &[u8]) -> Result<DecodedPacket> {
    decode(keypair.dh_secret(), bytes)
}
