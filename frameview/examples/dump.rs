//! Reports a captured UDP datagram and the echo reply it would get.
//!
//! Reads one raw link-layer frame from a file, such as the payload of a single packet saved from
//! a packet socket. Frames that are not UDP to the selected port are skipped, like an echo server
//! would skip them. No reply is sent; it is only printed.
use std::{fs, net, path::PathBuf, process};

use frameview::wire::{ethernet_frame, Error};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Config {
    /// File holding the raw frame, starting with the Ethernet header.
    capture: PathBuf,

    /// The UDP port of the echo service.
    #[structopt(long = "port", default_value = "4321")]
    port: u16,
}

/// IP protocol number of UDP.
const UDP_PROTOCOL: u8 = 17;

fn main() {
    let config = Config::from_args();

    let data = fs::read(&config.capture).unwrap_or_else(|err| {
        eprintln!("Couldn't read {}: {}", config.capture.display(), err);
        process::exit(1);
    });

    match report(&data, config.port) {
        Ok(true) => {},
        Ok(false) => println!("Not a UDP datagram for port {}, skipped", config.port),
        Err(err) => {
            eprintln!("Dropped frame: {}", err);
            process::exit(1);
        },
    }
}

fn report(data: &[u8], port: u16) -> Result<bool, Error> {
    let frame = ethernet_frame::new_checked(data)?;
    let packet = frame.ip_packet()?;
    if packet.protocol() != UDP_PROTOCOL {
        return Ok(false);
    }

    let datagram = packet.udp_datagram()?;
    if datagram.destination_port() != port {
        return Ok(false);
    }

    let body = datagram.body();

    println!("-------");
    println!("Ethernet:");
    println!("  Source MAC: {}", frame.source_mac());
    println!("  Destination MAC: {}", frame.destination_mac());
    println!();
    println!("IP:");
    println!("  Version: {}", packet.version());
    println!("  IHL: {}", packet.ihl());
    println!("  DSCP: {}", packet.dscp());
    println!("  ECN: {}", packet.ecn());
    println!("  Total Length: {}", packet.total_length());
    println!("  Identification: {}", packet.identification());
    println!("  Flags: {}", packet.flags());
    println!("  Fragment Offset: {}", packet.fragment_offset());
    println!("  Time To Live: {}", packet.time_to_live());
    println!("  Protocol: {}", packet.protocol());
    println!("  Header Checksum: {}", packet.header_checksum());
    println!("  Source IP Address: {}", packet.source_ip_address());
    println!("  Destination IP Address: {}", packet.destination_ip_address());
    println!();
    println!("UDP:");
    println!("  Source Port: {}", datagram.source_port());
    println!("  Destination Port: {}", datagram.destination_port());
    println!("  Length: {}", datagram.length());
    println!("  Checksum: {}", datagram.checksum());
    println!("  Body: {}", String::from_utf8_lossy(&body));
    println!();

    let reply = body.to_ascii_uppercase();
    let destination = net::SocketAddrV4::new(
        packet.source_ip_address().into(),
        datagram.source_port());
    println!("Reply to {}: {}", destination, String::from_utf8_lossy(&reply));

    Ok(true)
}
