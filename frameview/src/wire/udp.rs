//! The User Datagram Protocol datagram.
//!
//! ```text
//!  0        2        4        6        8
//! +--------+--------+--------+--------+-------------
//! |src port|dst port| length |checksum| body ...
//! +--------+--------+--------+--------+-------------
//! ```
use alloc::vec::Vec;
use core::fmt;
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::field::Field;

byte_wrapper! {
    /// A byte sequence representing a UDP datagram.
    ///
    /// Obtained through [`new_checked`] or [`ipv4::udp_datagram`]. Both guarantee that the header
    /// is present and that the declared length is consistent with the buffer.
    ///
    /// [`new_checked`]: #method.new_checked
    /// [`ipv4::udp_datagram`]: ../ipv4/struct.ipv4.html#method.udp_datagram
    #[derive(Debug, PartialEq, Eq)]
    pub struct udp([u8]);
}

mod field {
    #![allow(non_snake_case)]
    use crate::wire::field::Field;

    pub(crate) const SRC_PORT: Field = 0..2;
    pub(crate) const DST_PORT: Field = 2..4;
    pub(crate) const LENGTH:   Field = 4..6;
    pub(crate) const CHECKSUM: Field = 6..8;

    pub(crate) fn BODY(length: u16) -> Field {
        CHECKSUM.end..usize::from(length)
    }
}

impl udp {
    /// Imbue a raw octet buffer with UDP datagram structure.
    ///
    /// Returns `Err(Error::TruncatedFrame)` if the buffer is shorter than the header or than the
    /// length field declares, and `Err(Error::InvalidLength)` if the length field is smaller than
    /// the header itself.
    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        let datagram = Self::__from_macro_new_unchecked(data);
        datagram.check_len()?;
        Ok(datagram)
    }

    /// View the datagram as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    fn check_len(&self) -> Result<()> {
        let buffer_len = self.0.len();
        if buffer_len < field::CHECKSUM.end {
            net_trace!("udp: {} octets cannot hold a header", buffer_len);
            return Err(Error::TruncatedFrame);
        }

        let field_len = usize::from(self.length());
        if field_len < field::CHECKSUM.end {
            net_trace!("udp: length {} is shorter than the header", field_len);
            Err(Error::InvalidLength)
        } else if buffer_len < field_len {
            net_trace!("udp: length {} exceeds buffer of {}", field_len, buffer_len);
            Err(Error::TruncatedFrame)
        } else {
            Ok(())
        }
    }

    /// Return the length of the datagram header.
    pub fn header_len() -> usize {
        field::CHECKSUM.end
    }

    /// Return the source port field, octets `0..2`.
    #[inline]
    pub fn source_port(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::SRC_PORT])
    }

    /// Return the destination port field, octets `2..4`.
    #[inline]
    pub fn destination_port(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::DST_PORT])
    }

    /// Return the length field, octets `4..6`.
    ///
    /// The declared length of the whole datagram, header included.
    #[inline]
    pub fn length(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::LENGTH])
    }

    /// Return the checksum field, octets `6..8`. The value is not verified.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    /// Return the body as a byte slice.
    ///
    /// Covers `length() - 8` octets after the header; anything beyond the declared length is
    /// excluded.
    pub fn body_slice(&self) -> &[u8] {
        &self.0[field::BODY(self.length())]
    }

    /// Copy the body into an owned buffer.
    ///
    /// This is the only allocation of the decoders. It allows handing the body to another
    /// subsystem after the capture buffer has been released or reused.
    pub fn body(&self) -> Vec<u8> {
        self.body_slice().to_vec()
    }

    /// Compute the range of the body within the datagram.
    pub fn body_range(&self) -> Field {
        field::BODY(self.length())
    }
}

impl AsRef<[u8]> for udp {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for udp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Repr::parse(self), f)
    }
}

/// A high-level representation of a User Datagram Protocol header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    /// The port of the sender.
    pub src_port: u16,
    /// The port of the receiver.
    pub dst_port: u16,
    /// The length of the datagram, header included.
    pub length:   u16,
    /// The checksum as transmitted.
    pub checksum: u16,
}

impl Repr {
    /// Parse a UDP datagram and return a high-level representation.
    pub fn parse(datagram: &udp) -> Repr {
        Repr {
            src_port: datagram.source_port(),
            dst_port: datagram.destination_port(),
            length:   datagram.length(),
            checksum: datagram.checksum(),
        }
    }

    /// Return the length of the body described by this header.
    pub fn body_len(&self) -> usize {
        usize::from(self.length).saturating_sub(field::CHECKSUM.end)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UDP src={} dst={} len={}",
               self.src_port, self.dst_port, self.body_len())
    }
}
