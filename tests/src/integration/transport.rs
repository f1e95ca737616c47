//! Control packets over the loopback UDP transport.

use std::time::{Duration, Instant};

use wh_01_identity::search;
use wh_02_endpoint::adapters::udp::UdpTransport;
use wh_02_endpoint::{Address, Transport, TransportError};
use wh_03_packet::{open, peek_sender, seal};

fn recv_within(t: &UdpTransport, buf: &mut [u8], limit: Duration) -> (usize, Address) {
    let deadline = Instant::now() + limit;
    loop {
        match t.recv(buf) {
            Ok(got) => return got,
            Err(TransportError::WouldBlock) if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(e) => panic!("recv failed: {e}"),
        }
    }
}

#[test]
fn test_ping_pong_over_udp() {
    let alice = search(b"", 0, 1).unwrap();
    let bob = search(b"", 0, 1).unwrap();

    let loopback = Address::v4(127, 0, 0, 1, 0);
    let alice_sock = UdpTransport::bind(&loopback).unwrap();
    let bob_sock = UdpTransport::bind(&loopback).unwrap();
    let bob_addr = bob_sock.local_address().unwrap();

    let ping = seal(&alice, bob.dh_public(), false, b"ping").unwrap();
    alice_sock.send(&ping, &bob_addr).unwrap();

    let mut buf = [0u8; 1500];
    let (len, from) = recv_within(&bob_sock, &mut buf, Duration::from_secs(2));
    assert_eq!(from, alice_sock.local_address().unwrap());
    assert_eq!(&peek_sender(&buf[..len]).unwrap(), alice.dh_public());
    let opened = open(&bob, &buf[..len]).unwrap();
    assert_eq!(opened.body, b"ping");

    let pong = seal(&bob, &opened.sender, false, b"pong").unwrap();
    bob_sock.send(&pong, &from).unwrap();

    let (len, _) = recv_within(&alice_sock, &mut buf, Duration::from_secs(2));
    assert_eq!(open(&alice, &buf[..len]).unwrap().body, b"pong");
}
