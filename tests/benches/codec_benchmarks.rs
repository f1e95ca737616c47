//! # WireHub Benchmarks
//!
//! | Crate | Operation |
//! |-------|-----------|
//! | wh-01 Identity | workbit of one candidate key, XOR distance |
//! | wh-02 Endpoint | ORCHID derivation, address packing |
//! | wh-03 Packet | encode / decode by body size |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::{x25519_base, SecretBytes};
use wh_01_identity::{distance, key_workbit};
use wh_02_endpoint::{derive_orchid, pack, parse, unpack};
use wh_03_packet::{decode, encode};

// ============================================================================
// wh-01: Identity
// ============================================================================

fn bench_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("wh-01-identity");

    let key = x25519_base(&[0x42; 32]);
    group.bench_function("key_workbit", |b| {
        b.iter(|| black_box(key_workbit(black_box(&key), b"wirehub!").unwrap()))
    });

    let other = x25519_base(&[0x24; 32]);
    group.bench_function("distance", |b| {
        b.iter(|| black_box(distance(black_box(&key), Some(&other[..])).unwrap()))
    });

    group.finish();
}

// ============================================================================
// wh-02: Endpoint
// ============================================================================

fn bench_endpoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("wh-02-endpoint");

    let key = [7u8; 32];
    group.bench_function("derive_orchid", |b| {
        b.iter(|| black_box(derive_orchid(black_box(&key), b"wirehub", 0)))
    });

    for text in ["192.168.1.10:62096", "[2001:db8::1]:51820"] {
        let addr = parse(text, 0, true).unwrap();
        let packed = pack(&addr);
        group.bench_with_input(BenchmarkId::new("pack_unpack", text), &addr, |b, addr| {
            b.iter(|| {
                black_box(pack(addr));
                black_box(unpack(&packed).unwrap())
            })
        });
    }

    group.finish();
}

// ============================================================================
// wh-03: Packet
// ============================================================================

fn bench_packet(c: &mut Criterion) {
    let mut group = c.benchmark_group("wh-03-packet");

    let (alice_raw, bob_raw) = ([0x11u8; 32], [0x22u8; 32]);
    let alice_public = x25519_base(&alice_raw);
    let bob_public = x25519_base(&bob_raw);
    let alice = SecretBytes::from_array(alice_raw).unwrap();
    let bob = SecretBytes::from_array(bob_raw).unwrap();

    for size in [0usize, 64, 512, 1400] {
        let body = vec![0xAB; size];
        let packet = encode(&alice, &alice_public, &bob_public, false, 1_700_000_000, &body).unwrap();

        group.throughput(Throughput::Bytes(packet.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &body, |b, body| {
            b.iter(|| black_box(encode(&alice, &alice_public, &bob_public, false, 1_700_000_000, body).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &packet, |b, packet| {
            b.iter(|| black_box(decode(&bob, packet).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identity, bench_endpoint, bench_packet);
criterion_main!(benches);
