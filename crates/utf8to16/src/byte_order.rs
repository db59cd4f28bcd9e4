//! UTF-16 serialization order and the endianness transform.

/// Byte order of serialized UTF-16 code units.
///
/// A `u16` unit stored "in byte order `O`" is one whose in-memory bytes read
/// in order `O`. Storing `0x00A9` big-endian leaves the bytes `[0x00, 0xA9]`
/// in memory regardless of the host.
///
/// # Default
///
/// [`ByteOrder::BigEndian`], the order the encoder emits natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Most significant byte first (UTF-16BE).
    #[default]
    BigEndian,
    /// Least significant byte first (UTF-16LE).
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::BigEndian;
    /// The byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::LittleEndian;

    /// The other byte order.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::BigEndian => Self::LittleEndian,
            Self::LittleEndian => Self::BigEndian,
        }
    }

    /// Whether units in this order must be byte-swapped to be read natively.
    #[must_use]
    pub const fn is_foreign(self) -> bool {
        !matches!(
            (self, Self::NATIVE),
            (Self::BigEndian, Self::BigEndian) | (Self::LittleEndian, Self::LittleEndian)
        )
    }

    /// Converts a code unit value into its stored representation.
    #[must_use]
    #[inline]
    pub const fn store(self, unit: u16) -> u16 {
        match self {
            Self::BigEndian => unit.to_be(),
            Self::LittleEndian => unit.to_le(),
        }
    }

    /// Recovers a code unit value from its stored representation.
    #[must_use]
    #[inline]
    pub const fn load(self, stored: u16) -> u16 {
        match self {
            Self::BigEndian => u16::from_be(stored),
            Self::LittleEndian => u16::from_le(stored),
        }
    }

    /// Serializes a code unit value to two bytes.
    #[must_use]
    #[inline]
    pub const fn to_bytes(self, unit: u16) -> [u8; 2] {
        match self {
            Self::BigEndian => unit.to_be_bytes(),
            Self::LittleEndian => unit.to_le_bytes(),
        }
    }

    /// Parses a code unit value from two serialized bytes.
    #[must_use]
    #[inline]
    pub const fn from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::BigEndian => u16::from_be_bytes(bytes),
            Self::LittleEndian => u16::from_le_bytes(bytes),
        }
    }
}

/// Swaps the two bytes of every unit of `src` into `dst`.
///
/// Units are swapped independently; surrogate pairs are not interpreted.
/// Only `dst[..src.len()]` is written.
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
pub fn swap_utf16_byte_order(src: &[u16], dst: &mut [u16]) {
    let dst = &mut dst[..src.len()];
    for (out, unit) in dst.iter_mut().zip(src) {
        *out = unit.swap_bytes();
    }
}

/// Swaps the two bytes of every unit of `buf` in place.
pub fn swap_utf16_byte_order_in_place(buf: &mut [u16]) {
    for unit in buf {
        *unit = unit.swap_bytes();
    }
}
