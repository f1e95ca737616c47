//! # Integration Flows
//!
//! 1. **Key search → packets**: identities found by `wh-01` seal and open
//!    control packets from `wh-03`
//! 2. **Routing**: the unauthenticated sender picks the receiving identity
//! 3. **Addressing**: a node's ORCHID and packed endpoint travel in a body
//! 4. **Persistence**: a stored DH secret keeps working after reload

use std::collections::HashMap;

use shared_crypto::x25519_base;
use wh_01_identity::{
    distance, key_workbit, FileSecretStore, KeyPair, KeySearch, KeySearchConfig, SecretStore,
};
use wh_02_endpoint::{derive_orchid, is_orchid, pack_into, parse, same_subnet, unpack, Address};
use wh_03_packet::{decode, encode, open, peek_sender, seal, PacketError};

const CHALLENGE: &[u8] = b"wirehub-test";

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn identity(workbit: u32) -> KeyPair {
    KeySearch::new(KeySearchConfig::new(workbit, 2))
        .run(CHALLENGE)
        .unwrap()
        .keypair
}

// =============================================================================
// KEY SEARCH → PACKETS
// =============================================================================

#[test]
fn test_searched_identities_exchange_packets() {
    let alice = identity(4);
    let bob = identity(4);
    assert!(key_workbit(alice.dh_public(), CHALLENGE).unwrap() >= 4);
    assert!(key_workbit(bob.dh_public(), CHALLENGE).unwrap() >= 4);

    let ping = seal(&alice, bob.dh_public(), true, b"ping").unwrap();
    let opened = open(&bob, &ping).unwrap();
    assert_eq!(&opened.sender, alice.dh_public());
    assert!(opened.nated);

    let pong = seal(&bob, &opened.sender, false, b"pong").unwrap();
    let opened = open(&alice, &pong).unwrap();
    assert_eq!(&opened.sender, bob.dh_public());
    assert_eq!(opened.body, b"pong");
}

#[test]
fn test_packet_for_someone_else_is_unauthenticated() {
    let alice = identity(0);
    let bob = identity(0);
    let eve = identity(0);

    let packet = seal(&alice, bob.dh_public(), false, b"secret plan").unwrap();
    assert_eq!(open(&eve, &packet), Err(PacketError::Unauthenticated));
}

#[test]
fn test_forged_sender_is_unauthenticated() {
    let alice = identity(0);
    let bob = identity(0);
    let mallory = identity(0);

    let mut packet = seal(&mallory, bob.dh_public(), false, b"trust me").unwrap();
    packet[4..36].copy_from_slice(alice.dh_public());
    assert_eq!(open(&bob, &packet), Err(PacketError::Unauthenticated));
}

// =============================================================================
// ROUTING
// =============================================================================

#[test]
fn test_peek_sender_routes_to_peer_table() {
    let node = identity(0);
    let peers: Vec<KeyPair> = (0..4).map(|_| identity(0)).collect();
    let names: HashMap<[u8; 32], usize> = peers
        .iter()
        .enumerate()
        .map(|(i, p)| (*p.dh_public(), i))
        .collect();

    for (i, peer) in peers.iter().enumerate() {
        let packet = seal(peer, node.dh_public(), false, &[i as u8]).unwrap();
        let claimed = peek_sender(&packet).unwrap();
        assert_eq!(names[&claimed], i);
        assert_eq!(open(&node, &packet).unwrap().body, vec![i as u8]);
    }
}

#[test]
fn test_peers_sorted_by_distance() {
    let node = identity(0);
    let mut peers: Vec<KeyPair> = (0..8).map(|_| identity(0)).collect();
    peers.sort_by_key(|p| distance(node.dh_public(), Some(&p.dh_public()[..])).unwrap());

    let distances: Vec<u32> = peers
        .iter()
        .map(|p| distance(node.dh_public(), Some(&p.dh_public()[..])).unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|d| (1..=256).contains(d)));
}

// =============================================================================
// ADDRESSING
// =============================================================================

#[test]
fn test_endpoint_list_travels_in_body() {
    let alice = identity(0);
    let bob = identity(0);

    let endpoints = [
        parse("192.168.1.10:62096", 0, true).unwrap(),
        parse("[2001:db8::1]:51820", 0, true).unwrap(),
        derive_orchid(alice.dh_public(), b"wirehub", 0),
    ];
    let mut body = Vec::new();
    for ep in &endpoints {
        pack_into(ep, &mut body);
    }

    let packet = seal(&alice, bob.dh_public(), false, &body).unwrap();
    let opened = open(&bob, &packet).unwrap();

    let mut rest = opened.body.as_slice();
    let mut received = Vec::new();
    while !rest.is_empty() {
        let (addr, used) = unpack(rest).unwrap();
        received.push(addr);
        rest = &rest[used..];
    }
    assert_eq!(received, endpoints);
    assert!(is_orchid(&received[2]));
}

#[test]
fn test_orchid_addresses_share_overlay_prefix() {
    let a = derive_orchid(identity(0).dh_public(), b"wirehub", 0);
    let b = derive_orchid(identity(0).dh_public(), b"wirehub", 0);

    assert!(is_orchid(&a) && is_orchid(&b));
    assert_ne!(a, b);
    assert!(same_subnet(&a, &b, 20).unwrap());
    assert!(same_subnet(&a, &Address::v4(10, 0, 0, 1, 0), 8).is_err());
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[test]
fn test_stored_secret_still_opens_packets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wh.sk");
    let store = FileSecretStore::new();

    let bob = identity(0);
    store.save(&path, bob.dh_secret()).unwrap();
    let alice = identity(0);
    let packet = seal(&alice, bob.dh_public(), false, b"after restart").unwrap();
    drop(bob);

    let secret = store.load(&path).unwrap().unwrap();
    let public = x25519_base(secret.expose());
    let opened = decode(&secret, &packet).unwrap();
    assert_eq!(opened.body, b"after restart");

    let reply = encode(&secret, &public, alice.dh_public(), false, opened.timestamp, b"ok").unwrap();
    assert_eq!(open(&alice, &reply).unwrap().sender, public);
}
