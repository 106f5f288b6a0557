/// Define an enumeration with known variants and an unknown representation.
///
/// Header fields such as the EtherType or the IP protocol number are registries: only some
/// bit-patterns are assigned. The macro defines the known variants and an `Unknown` variant for
/// everything else, together with lossless conversions to and from the underlying integer.
///
/// ```ignore
/// enum_with_unknown! {
///     /// IP protocol numbers.
///     pub enum Protocol(u8) {
///         Tcp = 6,
///         Udp = 17,
///     }
/// }
/// ```
// Copyright (C) 2016 whitequark@whitequark.org
macro_rules! enum_with_unknown {
    (
        $( #[$enum_attr:meta] )*
        pub enum $name:ident($ty:ty) {
            $( $variant:ident = $value:expr ),+ $(,)*
        }
    ) => {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
        $( #[$enum_attr] )*
        pub enum $name {
            $(
              #[allow(missing_docs)]
              $variant
            ),*,
            /// A value whose interpretation was not determined.
            ///
            /// Parsed from an unknown or unsupported source. The raw value is kept so that it can
            /// be reported or forwarded unchanged.
            Unknown($ty)
        }

        impl ::core::convert::From<$ty> for $name {
            fn from(value: $ty) -> Self {
                match value {
                    $( $value => $name::$variant ),*,
                    other => $name::Unknown(other)
                }
            }
        }

        impl ::core::convert::From<$name> for $ty {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $value ),*,
                    $name::Unknown(other) => other
                }
            }
        }
    }
}

/// Declare a dynamically sized byte wrapper.
///
/// Use this to create byte slices with inner invariants. This macro performs two basic actions:
/// * Define a type with the indicated structure, documentation, attributes. The type can not have
///   any generic arguments and can only wrap a simple byte slice.
/// * Define a private method for conversion from a byte slice:
///   `fn __from_macro_new_unchecked(&[u8]) -> &Self`
///
/// The views in this crate are read-only, so no mutable conversion is generated.
macro_rules! byte_wrapper {
    (
        $( #[$attr:meta] )*
        pub struct $name:ident([u8])$(;)*
    ) => {
        #[allow(non_camel_case_types)]
        #[repr(transparent)]
        $( #[$attr] )*
        pub struct $name([u8]);

        impl $name {
            fn __from_macro_new_unchecked(data: &[u8]) -> &Self {
                // SAFETY: this is safe due to repr(transparent)
                unsafe { &*(data as *const [u8] as *const Self) }
            }
        }
    }
}

#[cfg(feature = "log")]
macro_rules! net_log {
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! net_log {
    ($level:ident, $($arg:expr),*) => { $( let _ = $arg; )* }
}

macro_rules! net_trace {
    ($($arg:tt)*) => (net_log!(trace, $($arg)*));
}

macro_rules! net_debug {
    ($($arg:tt)*) => (net_log!(debug, $($arg)*));
}
