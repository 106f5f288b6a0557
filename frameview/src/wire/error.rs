use core::fmt;

/// The error type for decoding a captured frame.
///
/// Only structural problems are errors. A header that is present and in bounds but carries
/// unexpected values is returned to the caller as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// A field or sub-range extends beyond the available data.
    ///
    /// The buffer may be shorter than the fixed header of the layer, shorter than the header
    /// length declared by the IPv4 IHL field, or shorter than a total length declared in the
    /// header.
    TruncatedFrame,

    /// A declared length field is structurally impossible.
    ///
    /// Examples: a UDP datagram claiming to be shorter than its own 8 octet header; an IPv4
    /// header length below the 20 octet minimum or beyond the declared total length.
    InvalidLength,
}

/// The result type for decoding.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TruncatedFrame => write!(f, "truncated frame"),
            Error::InvalidLength  => write!(f, "invalid length field"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
