#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use crate::{
    byte_order::ByteOrder,
    encoder::{ByteWriter, UnitWriter, Utf16Sink},
    engine::EngineKind,
    error::Utf8Error,
    options::TranscodeOptions,
};

/// A configured UTF-8 to UTF-16 transcoder.
///
/// The engine is resolved once, when the transcoder is built; afterwards the
/// transcoder is a small `Copy` value that can be shared freely between
/// threads.
///
/// ```rust
/// use utf8to16::{ByteOrder, TranscodeOptions, Transcoder};
///
/// let t = Transcoder::new(TranscodeOptions {
///     byte_order: ByteOrder::LittleEndian,
///     ..Default::default()
/// });
/// let src = "h\u{E9}llo \u{1F30D}".as_bytes();
/// let mut dst = vec![0u16; t.utf16_len(src)?];
/// let n = t.convert(src, &mut dst)?;
/// assert_eq!(n, 8);
/// # Ok::<(), utf8to16::Utf8Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transcoder {
    engine: EngineKind,
    byte_order: ByteOrder,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(TranscodeOptions::default())
    }
}

impl Transcoder {
    /// Builds a transcoder, resolving the engine choice.
    #[must_use]
    pub fn new(options: TranscodeOptions) -> Self {
        Self {
            engine: options.engine.resolve(),
            byte_order: options.byte_order,
        }
    }

    /// The engine doing the work.
    #[must_use]
    pub const fn engine(&self) -> EngineKind {
        self.engine
    }

    /// The byte order of produced code units.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns a copy of this transcoder producing `byte_order`.
    #[must_use]
    pub const fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Exact number of UTF-16 code units `src` converts to.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`, at the same offset
    /// [`convert`](Self::convert) would report.
    pub fn utf16_len(&self, src: &[u8]) -> Result<usize, Utf8Error> {
        self.engine.utf16_len(src).inspect_err(log_fault)
    }

    /// Converts `src` into `dst`, returning the number of code units written.
    ///
    /// Units are stored in this transcoder's byte order.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`. The contents of `dst` are then
    /// unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`utf16_len`](Self::utf16_len)
    /// reports for a well-formed `src`.
    pub fn convert(&self, src: &[u8], dst: &mut [u16]) -> Result<usize, Utf8Error> {
        self.convert_into(src, &mut UnitWriter::new(dst, self.byte_order))
    }

    /// Converts `src` into serialized UTF-16 bytes, returning the number of
    /// code units written (half the number of bytes).
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`. The contents of `dst` are then
    /// unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than twice the
    /// [`utf16_len`](Self::utf16_len) of a well-formed `src`.
    pub fn convert_to_bytes(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, Utf8Error> {
        self.convert_into(src, &mut ByteWriter::new(dst, self.byte_order))
    }

    /// Converts `src` into an arbitrary sink.
    ///
    /// The sink decides how units are serialized; this transcoder's byte
    /// order is not applied.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`.
    pub fn convert_into<S: Utf16Sink + ?Sized>(
        &self,
        src: &[u8],
        sink: &mut S,
    ) -> Result<usize, Utf8Error> {
        self.engine.convert(src, sink).inspect_err(log_fault)
    }

    /// Converts `src` into a vector sized exactly by a prior length pass.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`.
    #[cfg(feature = "alloc")]
    pub fn to_utf16_vec(&self, src: &[u8]) -> Result<Vec<u16>, Utf8Error> {
        let mut dst = vec![0; self.utf16_len(src)?];
        let written = self.convert(src, &mut dst)?;
        debug_assert_eq!(written, dst.len());
        Ok(dst)
    }

    /// Swaps the byte order of every unit of `src` into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `src`.
    pub fn swap_byte_order(&self, src: &[u16], dst: &mut [u16]) {
        self.engine.swap_byte_order(src, dst);
    }

    /// Swaps the byte order of every unit of `buf` in place.
    pub fn swap_byte_order_in_place(&self, buf: &mut [u16]) {
        self.engine.swap_byte_order_in_place(buf);
    }
}

fn log_fault(err: &Utf8Error) {
    log::trace!("rejected UTF-8 input: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::EngineChoice, error::Utf8ErrorKind};

    fn transcoder(engine: EngineKind, byte_order: ByteOrder) -> Transcoder {
        Transcoder::new(TranscodeOptions {
            byte_order,
            engine: EngineChoice::Fixed(engine),
        })
    }

    #[test]
    fn default_is_big_endian() {
        assert_eq!(Transcoder::default().byte_order(), ByteOrder::BigEndian);
    }

    #[test]
    fn fixed_engine_is_kept() {
        for kind in EngineKind::ALL {
            assert_eq!(transcoder(kind, ByteOrder::BigEndian).engine(), kind);
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn to_vec_is_exactly_sized() {
        for kind in EngineKind::ALL {
            let t = transcoder(kind, ByteOrder::NATIVE);
            let units = t.to_utf16_vec("a\u{10348}b".as_bytes()).unwrap();
            assert_eq!(units, [0x61, 0xD800, 0xDF48, 0x62]);
        }
    }

    #[test]
    fn convert_to_bytes_little_endian() {
        let t = transcoder(EngineKind::Scalar, ByteOrder::LittleEndian);
        let mut dst = [0u8; 4];
        assert_eq!(t.convert_to_bytes(b"hi", &mut dst), Ok(2));
        assert_eq!(dst, [b'h', 0, b'i', 0]);
    }

    #[test]
    fn with_byte_order_keeps_engine() {
        let t = transcoder(EngineKind::Scalar, ByteOrder::BigEndian)
            .with_byte_order(ByteOrder::LittleEndian);
        assert_eq!(t.engine(), EngineKind::Scalar);
        assert_eq!(t.byte_order(), ByteOrder::LittleEndian);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn errors_pass_through() {
        let t = transcoder(EngineKind::Swar, ByteOrder::BigEndian);
        let err = t.to_utf16_vec(&[b'a', 0xFF]).unwrap_err();
        assert_eq!(err.kind(), Utf8ErrorKind::InvalidLeadByte);
        assert_eq!(err.offset(), 1);
    }
}
