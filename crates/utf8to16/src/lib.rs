//! Validating UTF-8 to UTF-16 transcoding with exact length estimation.
//!
//! Conversion is a single left-to-right pass that decodes, validates and
//! encodes one code point at a time, stopping at the first ill-formed
//! sequence. A separate length pass walks the input the same way without
//! writing anything, so callers can size the destination exactly before
//! converting:
//!
//! ```rust
//! use utf8to16::{ByteOrder, convert_utf8_to_utf16_bytes, utf16_len_from_utf8};
//!
//! let src = [0xC2, 0xA9]; // U+00A9 COPYRIGHT SIGN
//! let len = utf16_len_from_utf8(&src)?;
//! assert_eq!(len, 1);
//!
//! let mut dst = vec![0u8; 2 * len];
//! convert_utf8_to_utf16_bytes(&src, &mut dst, ByteOrder::BigEndian)?;
//! assert_eq!(dst, [0x00, 0xA9]);
//! # Ok::<(), utf8to16::Utf8Error>(())
//! ```
//!
//! Malformed input is reported with the offset of the first byte of the
//! offending sequence:
//!
//! ```rust
//! use utf8to16::{Utf8ErrorKind, utf16_len_from_utf8};
//!
//! let err = utf16_len_from_utf8(b"ab\xC2").unwrap_err();
//! assert_eq!(err.kind(), Utf8ErrorKind::TruncatedSequence);
//! assert_eq!(err.offset(), 2);
//! ```
//!
//! The work is done by an [`Engine`]. The crate-level functions use the
//! engine picked by [`EngineChoice::Auto`]; build a [`Transcoder`] to pick
//! one explicitly.

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod byte_order;
mod decoder;
mod encoder;
mod engine;
mod error;
mod options;
mod transcoder;

#[cfg(all(test, feature = "alloc"))]
mod tests;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

pub use byte_order::{ByteOrder, swap_utf16_byte_order, swap_utf16_byte_order_in_place};
pub use encoder::{ByteWriter, UnitWriter, Utf16Sink};
pub use engine::{
    ENGINE_ENV_VAR, Engine, EngineChoice, EngineKind, Scalar, Swar, UnknownEngine,
};
pub use error::{Utf8Error, Utf8ErrorKind};
pub use options::TranscodeOptions;
pub use transcoder::Transcoder;

fn with_order(byte_order: ByteOrder) -> Transcoder {
    Transcoder::new(TranscodeOptions {
        byte_order,
        ..TranscodeOptions::default()
    })
}

/// Number of UTF-16 code units `src` converts to.
///
/// # Errors
///
/// Returns the first fault in `src`, at the same offset the conversion
/// functions would report.
pub fn utf16_len_from_utf8(src: &[u8]) -> Result<usize, Utf8Error> {
    Transcoder::default().utf16_len(src)
}

/// Converts `src` into `dst` with units stored in `byte_order`, returning the
/// number of units written.
///
/// # Errors
///
/// Returns the first fault in `src`; the contents of `dst` are then
/// unspecified.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`utf16_len_from_utf8`] reports for a
/// well-formed `src`.
pub fn convert_utf8_to_utf16(
    src: &[u8],
    dst: &mut [u16],
    byte_order: ByteOrder,
) -> Result<usize, Utf8Error> {
    with_order(byte_order).convert(src, dst)
}

/// Converts `src` into serialized UTF-16 bytes in `byte_order`, returning the
/// number of units written.
///
/// # Errors
///
/// Returns the first fault in `src`; the contents of `dst` are then
/// unspecified.
///
/// # Panics
///
/// Panics if `dst` is shorter than twice what [`utf16_len_from_utf8`]
/// reports for a well-formed `src`.
pub fn convert_utf8_to_utf16_bytes(
    src: &[u8],
    dst: &mut [u8],
    byte_order: ByteOrder,
) -> Result<usize, Utf8Error> {
    with_order(byte_order).convert_to_bytes(src, dst)
}

/// Converts `src` into a freshly allocated, exactly sized vector of units
/// stored in `byte_order`.
///
/// # Errors
///
/// Returns the first fault in `src`.
#[cfg(feature = "alloc")]
pub fn to_utf16_vec(src: &[u8], byte_order: ByteOrder) -> Result<Vec<u16>, Utf8Error> {
    with_order(byte_order).to_utf16_vec(src)
}
