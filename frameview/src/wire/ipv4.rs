//! The Internet Protocol version 4 packet.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|  IHL  |   DSCP    |ECN|          Total Length         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Identification        |Flags|     Fragment Offset     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Time to Live |    Protocol   |        Header Checksum        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Source Address                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Destination Address                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Options (IHL > 5, not parsed)              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Bits are numbered from the most significant bit of the first octet, as in [RFC 791].
//!
//! [RFC 791]: https://tools.ietf.org/html/rfc791#section-3.1
use core::fmt;
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result, word16};
use super::field::Field;
use super::udp::udp;

enum_with_unknown! {
    /// IP datagram encapsulated protocol.
    pub enum Protocol(u8) {
        Icmp = 0x01,
        Tcp  = 0x06,
        Udp  = 0x11,
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Protocol::Icmp => write!(f, "ICMP"),
            Protocol::Tcp  => write!(f, "TCP"),
            Protocol::Udp  => write!(f, "UDP"),
            Protocol::Unknown(id) => write!(f, "0x{:02x}", id)
        }
    }
}

/// A four-octet IPv4 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// Construct an IPv4 address from parts.
    pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
        Address([a0, a1, a2, a3])
    }

    /// Construct an IPv4 address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not four octets long.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Return an IPv4 address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "std")]
impl From<::std::net::Ipv4Addr> for Address {
    fn from(x: ::std::net::Ipv4Addr) -> Address {
        Address(x.octets())
    }
}

#[cfg(feature = "std")]
impl From<Address> for ::std::net::Ipv4Addr {
    fn from(Address(x): Address) -> ::std::net::Ipv4Addr {
        x.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

byte_wrapper! {
    /// A byte sequence representing an IPv4 packet.
    ///
    /// Obtained through [`new_checked`] or [`ethernet::ip_packet`]. Both guarantee that the whole
    /// header, including the options declared by the IHL field, is present.
    ///
    /// [`new_checked`]: #method.new_checked
    /// [`ethernet::ip_packet`]: ../ethernet/struct.ethernet.html#method.ip_packet
    #[derive(Debug, PartialEq, Eq)]
    pub struct ipv4([u8]);
}

mod field {
    use crate::wire::field::Field;

    pub(crate) const VER_IHL:  usize = 0;
    pub(crate) const DSCP_ECN: usize = 1;
    pub(crate) const LENGTH:   Field = 2..4;
    pub(crate) const IDENT:    Field = 4..6;
    pub(crate) const FLG_OFF:  Field = 6..8;
    pub(crate) const TTL:      usize = 8;
    pub(crate) const PROTOCOL: usize = 9;
    pub(crate) const CHECKSUM: Field = 10..12;
    pub(crate) const SRC_ADDR: Field = 12..16;
    pub(crate) const DST_ADDR: Field = 16..20;

    /// The IHL value of a header without options.
    pub(crate) const MIN_IHL:  u8 = 5;
}

impl ipv4 {
    /// Imbue a raw octet buffer with IPv4 packet structure.
    ///
    /// Returns `Err(Error::TruncatedFrame)` if the buffer is shorter than the 20 octet fixed
    /// header, or shorter than the header length declared by [`ihl`].
    ///
    /// The total length field is not checked here. Use [`payload`] to get a view of the payload
    /// bounded by it.
    ///
    /// [`ihl`]: #method.ihl
    /// [`payload`]: #method.payload
    pub fn new_checked(data: &[u8]) -> Result<&ipv4> {
        let packet = Self::__from_macro_new_unchecked(data);
        packet.check_len()?;
        Ok(packet)
    }

    /// View the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no header accessor will panic if called.
    ///
    /// The IHL field can only be read once the fixed header is known to be present.
    fn check_len(&self) -> Result<()> {
        let len = self.0.len();
        if len < field::DST_ADDR.end {
            net_trace!("ipv4: {} octets cannot hold a header", len);
            Err(Error::TruncatedFrame)
        } else if len < self.header_len() {
            net_trace!("ipv4: header of {} octets exceeds buffer of {}", self.header_len(), len);
            Err(Error::TruncatedFrame)
        } else {
            Ok(())
        }
    }

    /// Return the version field.
    ///
    /// Bits 0–3, the high nibble of octet 0:
    ///
    /// ```text
    ///     vvvv iiii  >> 4
    ///     0000 vvvv
    /// ```
    ///
    /// Not checked against `4`. An IPv6 header would be misread as IPv4 without complaint.
    #[inline]
    pub fn version(&self) -> u8 {
        self.0[field::VER_IHL] >> 4
    }

    /// Return the Internet Header Length field, in 32-bit words.
    ///
    /// Bits 4–7, the low nibble of octet 0:
    ///
    /// ```text
    ///     vvvv iiii
    /// AND 0000 1111  (0x0f)
    ///     0000 iiii
    /// ```
    ///
    /// A well-formed header has a value between 5 (20 octets, no options) and 15 (60 octets).
    #[inline]
    pub fn ihl(&self) -> u8 {
        self.0[field::VER_IHL] & 0x0f
    }

    /// Return the header length, in octets.
    ///
    /// This is `ihl() * 4`, the word count converted to octets.
    #[inline]
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl()) * 4
    }

    /// Return the Differentiated Services Code Point field.
    ///
    /// Bits 8–13, the top six bits of octet 1:
    ///
    /// ```text
    ///     dddd ddee
    /// AND 1111 1100  (0xfc)
    ///     dddd dd00  >> 2
    ///     00dd dddd
    /// ```
    pub fn dscp(&self) -> u8 {
        (self.0[field::DSCP_ECN] & 0xfc) >> 2
    }

    /// Return the Explicit Congestion Notification field.
    ///
    /// Bits 14–15, the bottom two bits of octet 1:
    ///
    /// ```text
    ///     dddd ddee
    /// AND 0000 0011  (0x03)
    ///     0000 00ee
    /// ```
    pub fn ecn(&self) -> u8 {
        self.0[field::DSCP_ECN] & 0x03
    }

    /// Return the total length field, in octets, including the header.
    ///
    /// Bits 16–31, octets 2 and 3 in network byte order.
    #[inline]
    pub fn total_length(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::LENGTH])
    }

    /// Return the fragment identification field.
    ///
    /// Bits 32–47, octets 4 and 5 in network byte order.
    #[inline]
    pub fn identification(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::IDENT])
    }

    /// Return the flags field.
    ///
    /// Bits 48–50, the top three bits of octet 6:
    ///
    /// ```text
    ///     fffo oooo  >> 5
    ///     0000 0fff
    /// ```
    ///
    /// From most to least significant: reserved, don't fragment, more fragments.
    #[inline]
    pub fn flags(&self) -> u8 {
        self.0[field::FLG_OFF.start] >> 5
    }

    /// Return the "don't fragment" flag.
    #[inline]
    pub fn dont_frag(&self) -> bool {
        self.flags() & 0b010 != 0
    }

    /// Return the "more fragments" flag.
    #[inline]
    pub fn more_frags(&self) -> bool {
        self.flags() & 0b001 != 0
    }

    /// Return the fragment offset field, in units of 8 octets.
    ///
    /// Bits 51–63, the low five bits of octet 6 followed by all of octet 7:
    ///
    /// ```text
    ///     fffo oooo
    /// AND 0001 1111  (0x1f)
    ///     000o oooo
    ///
    ///     000o oooo oooo oooo  word16(octet 6 & 0x1f, octet 7)
    /// ```
    #[inline]
    pub fn fragment_offset(&self) -> u16 {
        let [high, low] = [self.0[field::FLG_OFF.start], self.0[field::FLG_OFF.start + 1]];
        word16(high & 0x1f, low)
    }

    /// Return the time to live field.
    ///
    /// Bits 64–71, octet 8.
    #[inline]
    pub fn time_to_live(&self) -> u8 {
        self.0[field::TTL]
    }

    /// Return the raw protocol field.
    ///
    /// Bits 72–79, octet 9. See [`next_protocol`] for the typed value.
    ///
    /// [`next_protocol`]: #method.next_protocol
    #[inline]
    pub fn protocol(&self) -> u8 {
        self.0[field::PROTOCOL]
    }

    /// Return the protocol field as a known protocol, if it is one.
    #[inline]
    pub fn next_protocol(&self) -> Protocol {
        Protocol::from(self.protocol())
    }

    /// Return the header checksum field.
    ///
    /// Bits 80–95, octets 10 and 11 in network byte order. The value is not verified.
    #[inline]
    pub fn header_checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    /// Return the source address field.
    ///
    /// Bits 96–127, octets 12 to 15.
    #[inline]
    pub fn source_ip_address(&self) -> Address {
        Address::from_bytes(&self.0[field::SRC_ADDR])
    }

    /// Return the destination address field.
    ///
    /// Bits 128–159, octets 16 to 19.
    #[inline]
    pub fn destination_ip_address(&self) -> Address {
        Address::from_bytes(&self.0[field::DST_ADDR])
    }

    /// Compute the range of the payload without accessing it.
    ///
    /// This is the range from the end of the header to the declared total length. It need not
    /// lie within the buffer, and it is empty when the declared lengths contradict each other.
    pub fn payload_range(&self) -> Field {
        let header_end = self.header_len();
        let total_len = usize::from(self.total_length());
        header_end..total_len
    }

    /// Return the payload as a byte slice.
    ///
    /// Any link-layer padding after the declared total length is excluded.
    ///
    /// Returns `Err(Error::InvalidLength)` if the IHL is below 5 or the total length is smaller
    /// than the header, and `Err(Error::TruncatedFrame)` if the total length exceeds the buffer.
    pub fn payload(&self) -> Result<&[u8]> {
        let range = self.payload_range();
        if self.ihl() < field::MIN_IHL {
            net_trace!("ipv4: header length {} below the minimum", self.header_len());
            return Err(Error::InvalidLength);
        }
        if range.end < range.start {
            net_trace!("ipv4: total length {} shorter than header {}", range.end, range.start);
            return Err(Error::InvalidLength);
        }
        if range.end > self.0.len() {
            net_trace!("ipv4: total length {} exceeds buffer of {}", range.end, self.0.len());
            return Err(Error::TruncatedFrame);
        }
        Ok(&self.0[range])
    }

    /// View everything after the header as a UDP datagram.
    ///
    /// The datagram covers `header_len()..` up to the end of the buffer. The total length field
    /// is not consulted, captures with segmentation offload commonly carry `0` there. Padding
    /// after the datagram is harmless since the UDP length field bounds the body.
    ///
    /// The protocol field is not consulted either; check `protocol() == 17` first. Decoding any
    /// other payload as UDP yields meaningless values but never reads outside the buffer.
    ///
    /// Fails like [`udp::new_checked`].
    ///
    /// [`udp::new_checked`]: ../udp/struct.udp.html#method.new_checked
    pub fn udp_datagram(&self) -> Result<&udp> {
        if self.next_protocol() != Protocol::Udp {
            net_debug!("ipv4: decoding protocol {} as UDP", self.next_protocol());
        }
        udp::new_checked(&self.0[self.header_len()..])
    }
}

impl AsRef<[u8]> for ipv4 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Repr::parse(self), f)
    }
}

/// A high-level representation of an Internet Protocol version 4 packet header.
///
/// Holds every header field by value, so it can be kept after the capture is released.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    /// The version field, normally 4.
    pub version:         u8,
    /// The header length, in 32-bit words.
    pub ihl:             u8,
    /// The Differentiated Services Code Point.
    pub dscp:            u8,
    /// The Explicit Congestion Notification bits.
    pub ecn:             u8,
    /// The total length of the packet, in octets.
    pub total_length:    u16,
    /// The fragment identification.
    pub identification:  u16,
    /// The three flag bits.
    pub flags:           u8,
    /// The fragment offset, in units of 8 octets.
    pub fragment_offset: u16,
    /// The remaining time to live.
    pub time_to_live:    u8,
    /// The encapsulated protocol identifier.
    pub protocol:        Protocol,
    /// The header checksum as transmitted.
    pub header_checksum: u16,
    /// The source of the packet.
    pub src_addr:        Address,
    /// The destination of the packet.
    pub dst_addr:        Address,
}

impl Repr {
    /// Parse an Internet Protocol version 4 packet header and return a high-level representation.
    ///
    /// Never fails: every field of a checked packet is readable and no field is judged.
    pub fn parse(packet: &ipv4) -> Repr {
        Repr {
            version:         packet.version(),
            ihl:             packet.ihl(),
            dscp:            packet.dscp(),
            ecn:             packet.ecn(),
            total_length:    packet.total_length(),
            identification:  packet.identification(),
            flags:           packet.flags(),
            fragment_offset: packet.fragment_offset(),
            time_to_live:    packet.time_to_live(),
            protocol:        packet.next_protocol(),
            header_checksum: packet.header_checksum(),
            src_addr:        packet.source_ip_address(),
            dst_addr:        packet.destination_ip_address(),
        }
    }

    /// Return the header length, in octets.
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv4 src={} dst={} proto={} ttl={} tlen={}",
               self.src_addr, self.dst_addr, self.protocol, self.time_to_live, self.total_length)?;
        if self.version != 4 {
            write!(f, " ver={}", self.version)?;
        }
        if self.ihl != field::MIN_IHL {
            write!(f, " hlen={}", self.header_len())?;
        }
        if self.dscp != 0 {
            write!(f, " dscp={}", self.dscp)?;
        }
        if self.ecn != 0 {
            write!(f, " ecn={}", self.ecn)?;
        }
        if self.flags != 0 || self.fragment_offset != 0 {
            write!(f, " flags={:03b} off={} id={}",
                   self.flags, self.fragment_offset, self.identification)?;
        }
        Ok(())
    }
}
