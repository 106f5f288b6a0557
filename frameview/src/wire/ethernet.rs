//! The Ethernet II frame.
//!
//! ```text
//!  0                   6                  12         14
//! +-------------------+-------------------+----------+----------------
//! |  destination MAC  |    source MAC     | EtherType | payload ...
//! +-------------------+-------------------+----------+----------------
//! ```
use core::{fmt, str::FromStr};
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::ipv4::ipv4;

enum_with_unknown! {
    /// Ethernet protocol type.
    pub enum EtherType(u16) {
        Ipv4 = 0x0800,
        Arp  = 0x0806,
        Ipv6 = 0x86DD,
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EtherType::Ipv4 => write!(f, "IPv4"),
            EtherType::Ipv6 => write!(f, "IPv6"),
            EtherType::Arp  => write!(f, "ARP"),
            EtherType::Unknown(id) => write!(f, "0x{:04x}", id)
        }
    }
}

/// A six-octet Ethernet II address.
///
/// Displayed as six colon separated, uppercase hexadecimal octets, e.g. `08:00:27:D7:47:6C`. The
/// [`FromStr`] implementation accepts the same format in either case.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 6]);

impl Address {
    /// The broadcast address.
    pub const BROADCAST: Address = Address([0xff; 6]);

    /// Construct an Ethernet address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not six octets long.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut bytes = [0; 6];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Return an Ethernet address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Error returned when parsing an [`Address`] from text fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseAddressError {
    kind: ParseAddressErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseAddressErrorKind {
    ComponentError,
    SeparatorError,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
               bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5])
    }
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self.kind {
            ParseAddressErrorKind::ComponentError => "invalid ethernet component",
            ParseAddressErrorKind::SeparatorError => "unexpected number of ethernet address components (should be 6)",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseAddressError {}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(src: &str) -> core::result::Result<Self, ParseAddressError> {
        let component_error = ParseAddressError {
            kind: ParseAddressErrorKind::ComponentError,
        };

        let mut parsed = [0; 6];
        let mut components = src.split(':');
        for c in parsed.iter_mut() {
            let part = components
                .next()
                .ok_or(ParseAddressError {
                    kind: ParseAddressErrorKind::SeparatorError,
                })?;
            // `from_str_radix` alone would also take a sign or a single digit.
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(component_error);
            }
            *c = u8::from_str_radix(part, 16)
                .map_err(|_| component_error)?;
        }

        if components.next().is_some() {
            Err(ParseAddressError {
                kind: ParseAddressErrorKind::SeparatorError,
            })
        } else {
            Ok(Address(parsed))
        }
    }
}

byte_wrapper! {
    /// A byte sequence representing an Ethernet II frame.
    ///
    /// Obtained through [`new_checked`], which guarantees the 14 octet header is present.
    ///
    /// [`new_checked`]: #method.new_checked
    #[derive(Debug, PartialEq, Eq)]
    pub struct ethernet([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const DESTINATION: Field =  0..6;
    pub(crate) const SOURCE:      Field =  6..12;
    pub(crate) const ETHERTYPE:   Field = 12..14;
    pub(crate) const PAYLOAD:     Rest  = 14..;
}

impl ethernet {
    /// Imbue a raw octet buffer with Ethernet II frame structure.
    ///
    /// Returns `Err(Error::TruncatedFrame)` if the buffer is shorter than the header.
    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        let frame = Self::__from_macro_new_unchecked(data);
        frame.check_len()?;
        Ok(frame)
    }

    /// Unwrap the frame as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error::TruncatedFrame)` if the buffer is too short.
    fn check_len(&self) -> Result<()> {
        let len = self.0.len();
        if len < field::PAYLOAD.start {
            net_trace!("ethernet: {} octets cannot hold a header", len);
            Err(Error::TruncatedFrame)
        } else {
            Ok(())
        }
    }

    /// Return the length of a frame header.
    pub fn header_len() -> usize {
        field::PAYLOAD.start
    }

    /// Return the destination address field, octets `0..6`.
    pub fn destination_mac(&self) -> Address {
        Address::from_bytes(&self.0[field::DESTINATION])
    }

    /// Return the source address field, octets `6..12`.
    pub fn source_mac(&self) -> Address {
        Address::from_bytes(&self.0[field::SOURCE])
    }

    /// Return the EtherType field, octets `12..14`, without checking for 802.1Q.
    pub fn ethertype(&self) -> EtherType {
        let raw = NetworkEndian::read_u16(&self.0[field::ETHERTYPE]);
        EtherType::from(raw)
    }

    /// Return the payload as a byte slice.
    pub fn payload_slice(&self) -> &[u8] {
        &self.0[field::PAYLOAD]
    }

    /// View the payload as an IPv4 packet.
    ///
    /// The payload extends to the end of the buffer, including any link-layer padding. The
    /// EtherType is not consulted; check it first if the capture may carry other protocols.
    ///
    /// Fails like [`ipv4::new_checked`] when the payload is too short for an IPv4 header.
    ///
    /// [`ipv4::new_checked`]: ../ipv4/struct.ipv4.html#method.new_checked
    pub fn ip_packet(&self) -> Result<&ipv4> {
        if self.ethertype() != EtherType::Ipv4 {
            net_debug!("ethernet: decoding ethertype {} as IPv4", self.ethertype());
        }
        ipv4::new_checked(self.payload_slice())
    }
}

impl AsRef<[u8]> for ethernet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ethernet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Repr::parse(self), f)
    }
}

/// A high-level representation of an Ethernet II frame header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    /// The source hardware address.
    pub src_addr:    Address,
    /// The destination hardware address.
    pub dst_addr:    Address,
    /// The protocol of the payload.
    pub ethertype:   EtherType,
}

impl Repr {
    /// Parse an Ethernet II frame and return a high-level representation.
    pub fn parse(frame: &ethernet) -> Repr {
        Repr {
            src_addr: frame.source_mac(),
            dst_addr: frame.destination_mac(),
            ethertype: frame.ethertype(),
        }
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EthernetII src={} dst={} type={}",
               self.src_addr, self.dst_addr, self.ethertype)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static FRAME_BYTES: [u8; 34] =
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
         0x11, 0x12, 0x13, 0x14, 0x15, 0x16,
         0x08, 0x00,
         0x45, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x00,
         0x40, 0x11, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x01,
         0x0a, 0x00, 0x00, 0x02];

    static PAYLOAD_BYTES: [u8; 20] =
        [0x45, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x00,
         0x40, 0x11, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x01,
         0x0a, 0x00, 0x00, 0x02];

    #[test]
    fn test_deconstruct() {
        let frame = ethernet::new_checked(&FRAME_BYTES[..]).unwrap();
        assert_eq!(frame.destination_mac(), Address([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]));
        assert_eq!(frame.source_mac(), Address([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]));
        assert_eq!(frame.ethertype(), EtherType::Ipv4);
        assert_eq!(frame.payload_slice(), &PAYLOAD_BYTES[..]);
        assert_eq!(frame.ip_packet().unwrap().as_bytes(), &PAYLOAD_BYTES[..]);
    }

    #[test]
    fn test_header_only() {
        let frame = ethernet::new_checked(&FRAME_BYTES[..ethernet::header_len()]).unwrap();
        assert_eq!(ethernet::header_len(), 14);
        assert!(frame.payload_slice().is_empty());
        assert_eq!(frame.ip_packet(), Err(Error::TruncatedFrame));
    }

    #[test]
    fn test_truncated() {
        for len in 0..14 {
            assert_eq!(ethernet::new_checked(&FRAME_BYTES[..len]), Err(Error::TruncatedFrame));
        }
    }

    #[test]
    fn test_unknown_ethertype() {
        let mut bytes = FRAME_BYTES;
        bytes[12..14].copy_from_slice(&[0x88, 0xb5]);
        let frame = ethernet::new_checked(&bytes[..]).unwrap();
        assert_eq!(frame.ethertype(), EtherType::Unknown(0x88b5));
        assert_eq!(u16::from(frame.ethertype()), 0x88b5);
        // Descending does not depend on the EtherType.
        assert!(frame.ip_packet().is_ok());
    }

    #[test]
    fn test_address_format() {
        let addr = Address([0x08, 0x00, 0x27, 0xd7, 0x47, 0x6c]);
        assert_eq!(addr.to_string(), "08:00:27:D7:47:6C");
        assert_eq!(Address([0x0a, 0, 0x27, 0, 0, 0]).to_string(), "0A:00:27:00:00:00");
    }

    #[test]
    fn test_address_round_trip() {
        let addresses = [
            Address([0x08, 0x00, 0x27, 0xd7, 0x47, 0x6c]),
            Address::BROADCAST,
            Address::default(),
            Address([0x01, 0x23, 0x45, 0x67, 0x89, 0xab]),
        ];

        for addr in addresses.iter() {
            let parsed: Address = addr.to_string().parse().unwrap();
            assert_eq!(parsed, *addr);
        }

        let lower: Address = "08:00:27:d7:47:6c".parse().unwrap();
        assert_eq!(lower, addresses[0]);
    }

    #[test]
    fn test_address_parse_errors() {
        assert!("08:00:27:D7:47".parse::<Address>().is_err());
        assert!("08:00:27:D7:47:6C:00".parse::<Address>().is_err());
        assert!("08:00:27:D7:47:6G".parse::<Address>().is_err());
        assert!("08:00:27:D7:47:+6".parse::<Address>().is_err());
        assert!("8:00:27:D7:47:6C".parse::<Address>().is_err());
        assert!("08-00-27-D7-47-6C".parse::<Address>().is_err());

        let err = "08:00:27:D7:47:6G".parse::<Address>().unwrap_err();
        assert_eq!(err.to_string(), "invalid ethernet component");
        let err = "08:00:27:D7:47".parse::<Address>().unwrap_err();
        assert_eq!(err.to_string(),
                   "unexpected number of ethernet address components (should be 6)");
    }

    #[test]
    fn test_display() {
        let frame = ethernet::new_checked(&FRAME_BYTES[..]).unwrap();
        assert_eq!(frame.to_string(),
                   "EthernetII src=11:12:13:14:15:16 dst=01:02:03:04:05:06 type=IPv4");
    }
}
