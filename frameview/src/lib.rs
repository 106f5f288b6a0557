//! Zero-copy views of captured link-layer frames.
//!
//! ## Table of contents
//!
//! 1. [Overview](#overview)
//! 2. [Design](#design)
//! 3. [The wire module](wire/index.html)
//!    1. [Ethernet](wire/ethernet/index.html)
//!    1. [IPv4](wire/ipv4/index.html)
//!    1. [UDP](wire/udp/index.html)
//!
//! ## Overview
//!
//! A captured frame is a plain sequence of octets. This crate lays three nested protocol views
//! over it, Ethernet II, IPv4 and UDP, and exposes every header field as a typed value:
//!
//! ```rust
//! use frameview::wire::ethernet_frame;
//! # let capture: &[u8] = &[
//! #     0x08, 0x00, 0x27, 0xd7, 0x47, 0x6c, 0x0a, 0x00, 0x27, 0x00, 0x00, 0x00, 0x08, 0x00,
//! #     0x45, 0x00, 0x00, 0x22, 0xe1, 0x42, 0x00, 0x00, 0x40, 0x11, 0xd6, 0x2c,
//! #     0xc0, 0xa8, 0x21, 0x01, 0xc0, 0xa8, 0x21, 0x0a,
//! #     0xc8, 0x3d, 0x10, 0xe1, 0x00, 0x0e, 0x1f, 0x7b,
//! #     b'h', b'e', b'l', b'l', b'o', b'\n'];
//! let frame = ethernet_frame::new_checked(capture)?;
//! let packet = frame.ip_packet()?;
//! if packet.protocol() == 17 {
//!     let datagram = packet.udp_datagram()?;
//!     assert_eq!(datagram.destination_port(), 4321);
//!     assert_eq!(datagram.body(), b"hello\n");
//! }
//! # Ok::<(), frameview::wire::Error>(())
//! ```
//!
//! ## Design
//!
//! Each view is a dynamically sized wrapper around `[u8]`, so descending a layer only narrows a
//! borrow of the caller's buffer. Nothing is copied until the caller asks for an owned UDP body.
//!
//! Views are only handed out by checked constructors. Once a view exists, the bytes of its fixed
//! header are known to be present and the field accessors cannot fail. Sub-views whose extent
//! depends on a length field (the IPv4 payload, the UDP body) are checked again when requested.
//! No decoder ever reads outside the buffer; it reports [`Error::TruncatedFrame`] or
//! [`Error::InvalidLength`] instead.
//!
//! Values that are merely unusual, such as a version other than 4 or a checksum that does not
//! match, are returned as they are. Judging them is up to the caller.
//!
//! [`Error::TruncatedFrame`]: wire/enum.Error.html#variant.TruncatedFrame
//! [`Error::InvalidLength`]: wire/enum.Error.html#variant.InvalidLength
#![warn(missing_docs)]
#![warn(unreachable_pub)]

// tests should be able to use `std`
#![cfg_attr(all(
    not(feature = "std"),
    not(test)),
no_std)]

extern crate alloc;

#[macro_use] mod macros;
pub mod wire;
