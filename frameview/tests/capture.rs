//! Decodes a UDP datagram carrying "hello\n" to port 4321, as `nc -u` sends it, framed as captured.
use std::thread;

use frameview::wire::{self, ethernet_frame, ipv4_packet, udp_datagram};
use frameview::wire::{EthernetAddress, EthernetProtocol, IpProtocol, Ipv4Address};

/// The capture as received, padded by the link layer to the 60 octet minimum.
static CAPTURE: &[u8] = include_bytes!("fixtures/ethernet_frame.dat");

/// Header, IPv4 packet and UDP datagram without the link-layer padding.
const UNPADDED_LEN: usize = 14 + 34;

#[test]
fn ethernet_fields() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    assert_eq!(frame.destination_mac().to_string(), "08:00:27:D7:47:6C");
    assert_eq!(frame.source_mac().to_string(), "0A:00:27:00:00:00");
    assert_eq!(frame.ethertype(), EthernetProtocol::Ipv4);
}

#[test]
fn ipv4_fields() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    let packet = frame.ip_packet().unwrap();
    assert_eq!(packet.version(), 4);
    assert_eq!(packet.ihl(), 5);
    assert_eq!(packet.dscp(), 0);
    assert_eq!(packet.ecn(), 0);
    assert_eq!(packet.total_length(), 34);
    assert_eq!(packet.identification(), 0xe142);
    assert_eq!(packet.flags(), 0);
    assert_eq!(packet.fragment_offset(), 0);
    assert_eq!(packet.time_to_live(), 64);
    assert_eq!(packet.protocol(), 17);
    assert_eq!(packet.next_protocol(), IpProtocol::Udp);
    assert_eq!(packet.header_checksum(), 0xd62c);
    assert_eq!(packet.source_ip_address().to_string(), "192.168.33.1");
    assert_eq!(packet.destination_ip_address().to_string(), "192.168.33.10");
}

#[test]
fn udp_fields() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    let datagram = frame.ip_packet().unwrap().udp_datagram().unwrap();
    assert_eq!(datagram.source_port(), 51261);
    assert_eq!(datagram.destination_port(), 4321);
    assert_eq!(datagram.length(), 14);
    assert_eq!(datagram.checksum(), 0x1f7b);
    assert_eq!(datagram.body(), b"hello\n".to_vec());
}

#[test]
fn layers_borrow_the_capture() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    let packet = frame.ip_packet().unwrap();
    let datagram = packet.udp_datagram().unwrap();

    let base = CAPTURE.as_ptr();
    assert_eq!(frame.as_bytes().as_ptr(), base);
    assert_eq!(packet.as_bytes().as_ptr(), base.wrapping_add(14));
    assert_eq!(datagram.as_bytes().as_ptr(), base.wrapping_add(34));
    assert_eq!(datagram.body_slice().as_ptr(), base.wrapping_add(42));
}

#[test]
fn lengths_are_consistent() {
    for capture in [CAPTURE, &CAPTURE[..UNPADDED_LEN]].iter() {
        let frame = ethernet_frame::new_checked(capture).unwrap();
        let packet = frame.ip_packet().unwrap();
        let datagram = packet.udp_datagram().unwrap();

        assert_eq!(datagram.body().len(), usize::from(datagram.length()) - 8);
        assert!(usize::from(packet.total_length()) <= capture.len() - 14);
        assert_eq!(packet.payload().unwrap().len(), usize::from(datagram.length()));
    }

    let frame = ethernet_frame::new_checked(&CAPTURE[..UNPADDED_LEN]).unwrap();
    let packet = frame.ip_packet().unwrap();
    assert_eq!(usize::from(packet.total_length()), UNPADDED_LEN - 14);
}

#[test]
fn access_is_idempotent() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    let first = wire::Ipv4Repr::parse(frame.ip_packet().unwrap());
    let second = wire::Ipv4Repr::parse(frame.ip_packet().unwrap());
    assert_eq!(first, second);

    let datagram = frame.ip_packet().unwrap().udp_datagram().unwrap();
    assert_eq!(datagram.body(), datagram.body());
    assert_eq!(wire::UdpRepr::parse(datagram), wire::UdpRepr::parse(datagram));
}

#[test]
fn every_truncation_is_an_error() {
    for len in 0..14 {
        assert_eq!(ethernet_frame::new_checked(&CAPTURE[..len]).err(),
                   Some(wire::Error::TruncatedFrame));
    }

    // Cut anywhere inside the IPv4 header or the UDP datagram.
    for len in 14..UNPADDED_LEN {
        let frame = ethernet_frame::new_checked(&CAPTURE[..len]).unwrap();
        let result = frame.ip_packet().and_then(|packet| packet.udp_datagram());
        assert_eq!(result.err(), Some(wire::Error::TruncatedFrame), "cut at {}", len);
    }
}

#[test]
fn total_length_does_not_bound_the_datagram() {
    for &total_len in [0u16, 20, 1500].iter() {
        let mut capture = CAPTURE.to_vec();
        capture[16..18].copy_from_slice(&total_len.to_be_bytes());

        let frame = ethernet_frame::new_checked(&capture).unwrap();
        let packet = frame.ip_packet().unwrap();
        assert_eq!(packet.total_length(), total_len);

        let datagram = packet.udp_datagram().unwrap();
        assert_eq!(datagram.destination_port(), 4321);
        assert_eq!(datagram.body(), b"hello\n".to_vec());
    }
}

#[test]
fn layers_decode_standalone() {
    let packet = ipv4_packet::new_checked(&CAPTURE[14..]).unwrap();
    assert_eq!(packet.source_ip_address(), Ipv4Address::new(192, 168, 33, 1));

    let datagram = udp_datagram::new_checked(&CAPTURE[34..]).unwrap();
    assert_eq!(datagram.body_slice(), b"hello\n");
}

#[test]
fn mac_round_trip() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    for addr in [frame.destination_mac(), frame.source_mac()].iter() {
        let parsed: EthernetAddress = addr.to_string().parse().unwrap();
        assert_eq!(parsed.as_bytes(), addr.as_bytes());
    }
}

#[test]
fn display_summaries() {
    let frame = ethernet_frame::new_checked(CAPTURE).unwrap();
    let packet = frame.ip_packet().unwrap();
    let datagram = packet.udp_datagram().unwrap();
    assert_eq!(frame.to_string(), "EthernetII src=0A:00:27:00:00:00 dst=08:00:27:D7:47:6C type=IPv4");
    assert_eq!(packet.to_string(), "IPv4 src=192.168.33.1 dst=192.168.33.10 proto=UDP ttl=64 tlen=34");
    assert_eq!(datagram.to_string(), "UDP src=51261 dst=4321 len=6");
}

#[test]
fn frames_decode_on_independent_threads() {
    let workers: Vec<_> = (0..4u8)
        .map(|id| {
            let mut capture = CAPTURE.to_vec();
            // Give every frame its own identification.
            capture[19] = id;
            thread::spawn(move || {
                let frame = ethernet_frame::new_checked(&capture).unwrap();
                let packet = frame.ip_packet().unwrap();
                (packet.identification(), packet.udp_datagram().unwrap().body())
            })
        })
        .collect();

    for (id, worker) in workers.into_iter().enumerate() {
        let (ident, body) = worker.join().unwrap();
        assert_eq!(ident, 0xe100 | id as u16);
        assert_eq!(body, b"hello\n".to_vec());
    }
}
