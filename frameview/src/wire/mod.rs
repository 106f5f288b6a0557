/*! Low-level packet access.

# An overview over packet representations

The `wire` module deals with the packet *representation*. It provides two levels of
functionality.

 * First, it provides functions to extract fields from sequences of octets. This happens in the
   lowercase structures [`ethernet_frame`], [`ipv4_packet`] and [`udp_datagram`]. They are
   dynamically sized wrappers of `[u8]`, so a reference to one of them is a borrowed slice of the
   captured buffer and never a copy.
 * Second, it provides a compact, high-level representation of header data that can be created
   from parsing. This happens through the `Repr` structs, e.g. [`Ipv4Repr`]. A `Repr` is `Copy` and
   does not borrow the buffer, so it may outlive the capture it was parsed from.

[`ethernet_frame`]: ethernet/struct.ethernet.html
[`ipv4_packet`]: ipv4/struct.ipv4.html
[`udp_datagram`]: udp/struct.udp.html
[`Ipv4Repr`]: ipv4/struct.Repr.html

The lowercase structures can only be obtained through their `new_checked` constructor or by
descending from the layer below (`ethernet::ip_packet`, `ipv4::udp_datagram`). Both check that
the fixed part of the header is present, so no field accessor will panic. Regions whose extent is
declared by a length field are checked again whenever they are requested, and a failed check is
reported as an [`Error`] instead of reading past the buffer.

Nothing in this module validates content. A version other than 4, an unknown EtherType or a wrong
checksum are returned as plain values for the caller to judge.

# Examples

```rust
use frameview::wire::{ipv4_packet, Ipv4Address};

let bytes = [
    0x45, 0x00, 0x00, 0x1c, 0xe1, 0x42, 0x00, 0x00,
    0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8, 0x21, 0x01,
    0xc0, 0xa8, 0x21, 0x0a,
    0xc8, 0x3d, 0x10, 0xe1, 0x00, 0x08, 0x00, 0x00,
];
let packet = ipv4_packet::new_checked(&bytes)?;
assert_eq!(packet.source_ip_address(), Ipv4Address::new(192, 168, 33, 1));
let datagram = packet.udp_datagram()?;
assert_eq!(datagram.source_port(), 51261);
assert!(datagram.body_slice().is_empty());
# Ok::<(), frameview::wire::Error>(())
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in parts from `smoltcp` originally distributed under 0-clause BSD

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest  = ::core::ops::RangeFrom<usize>;
}

pub mod ethernet;
pub mod ipv4;
pub mod udp;
mod error;

pub use self::error::{
    Error,
    Result};

pub use self::ethernet::{
    ethernet as ethernet_frame,
    EtherType as EthernetProtocol,
    Address as EthernetAddress,
    Repr as EthernetRepr};

pub use self::ipv4::{
    ipv4 as ipv4_packet,
    Protocol as IpProtocol,
    Address as Ipv4Address,
    Repr as Ipv4Repr};

pub use self::udp::{
    udp as udp_datagram,
    Repr as UdpRepr};

/// Combine two octets into a 16-bit word in network byte order.
///
/// `high` becomes the most significant octet:
///
/// ```text
///     high           low
///     1010 1111      1100 0011
///
///     1010 1111 0000 0000      high << 8
///  OR 0000 0000 1100 0011      low
///     -------------------
///     1010 1111 1100 0011
/// ```
///
/// This is the same value `byteorder::NetworkEndian::read_u16` produces for `[high, low]`, which
/// the decoders use for fields that occupy two whole octets.
#[inline]
pub const fn word16(high: u8, low: u8) -> u16 {
    (high as u16) << 8 | low as u16
}
