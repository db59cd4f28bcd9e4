//! Scalar value to UTF-16 code unit encoding, and the sinks that receive the
//! units.

use crate::byte_order::ByteOrder;

const HIGH_SURROGATE: u32 = 0xD800;
const LOW_SURROGATE: u32 = 0xDC00;
const SUPPLEMENTARY: u32 = 0x1_0000;

/// Number of UTF-16 code units `ch` encodes to.
#[inline]
pub(crate) const fn units_for(ch: char) -> usize {
    if (ch as u32) < SUPPLEMENTARY { 1 } else { 2 }
}

/// Writes the UTF-16 encoding of `ch` to `sink`.
#[inline]
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn encode<S: Utf16Sink + ?Sized>(ch: char, sink: &mut S) {
    let value = ch as u32;
    if value < SUPPLEMENTARY {
        sink.push(value as u16);
    } else {
        let v = value - SUPPLEMENTARY;
        sink.push((HIGH_SURROGATE + (v >> 10)) as u16);
        sink.push((LOW_SURROGATE + (v & 0x3FF)) as u16);
    }
}

/// Destination for UTF-16 code units produced by an [`Engine`].
///
/// Units are handed over as numeric values; the sink decides how to
/// serialize them.
///
/// [`Engine`]: crate::Engine
pub trait Utf16Sink {
    /// Appends one code unit.
    fn push(&mut self, unit: u16);

    /// Appends one code unit per byte of an all-ASCII run.
    fn push_ascii(&mut self, ascii: &[u8]) {
        for &b in ascii {
            self.push(u16::from(b));
        }
    }

    /// Number of code units appended so far.
    fn written(&self) -> usize;
}

/// Writes code units into a `u16` slice in a fixed [`ByteOrder`].
///
/// # Panics
///
/// Pushing past the end of the slice panics.
#[derive(Debug)]
pub struct UnitWriter<'a> {
    dst: &'a mut [u16],
    len: usize,
    order: ByteOrder,
}

impl<'a> UnitWriter<'a> {
    /// Creates a writer that fills `dst` from the start.
    pub fn new(dst: &'a mut [u16], order: ByteOrder) -> Self {
        Self { dst, len: 0, order }
    }
}

impl Utf16Sink for UnitWriter<'_> {
    #[inline]
    fn push(&mut self, unit: u16) {
        self.dst[self.len] = self.order.store(unit);
        self.len += 1;
    }

    #[inline]
    fn push_ascii(&mut self, ascii: &[u8]) {
        let out = &mut self.dst[self.len..self.len + ascii.len()];
        for (slot, &b) in out.iter_mut().zip(ascii) {
            *slot = self.order.store(u16::from(b));
        }
        self.len += ascii.len();
    }

    fn written(&self) -> usize {
        self.len
    }
}

/// Serializes code units into a byte slice, two bytes per unit.
///
/// # Panics
///
/// Pushing past the end of the slice panics.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    dst: &'a mut [u8],
    len: usize,
    order: ByteOrder,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer that fills `dst` from the start.
    pub fn new(dst: &'a mut [u8], order: ByteOrder) -> Self {
        Self { dst, len: 0, order }
    }
}

impl Utf16Sink for ByteWriter<'_> {
    #[inline]
    fn push(&mut self, unit: u16) {
        let at = self.len * 2;
        self.dst[at..at + 2].copy_from_slice(&self.order.to_bytes(unit));
        self.len += 1;
    }

    fn written(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect {
        units: [u16; 2],
        len: usize,
    }

    impl Utf16Sink for Collect {
        fn push(&mut self, unit: u16) {
            self.units[self.len] = unit;
            self.len += 1;
        }

        fn written(&self) -> usize {
            self.len
        }
    }

    fn encoded(ch: char) -> ([u16; 2], usize) {
        let mut sink = Collect {
            units: [0; 2],
            len: 0,
        };
        encode(ch, &mut sink);
        (sink.units, sink.written())
    }

    #[test]
    fn matches_core_encoder() {
        let chars = [
            '\0',
            'A',
            '\u{A9}',
            '\u{7FF}',
            '\u{D7FF}',
            '\u{E000}',
            '\u{FFFF}',
            '\u{10000}',
            '\u{1F600}',
            '\u{10FFFF}',
        ];
        for ch in chars {
            let mut buf = [0u16; 2];
            let expected = ch.encode_utf16(&mut buf);
            let (units, len) = encoded(ch);
            assert_eq!(&units[..len], expected, "{ch:?}");
            assert_eq!(units_for(ch), len);
        }
    }

    #[test]
    fn surrogate_pair_arithmetic() {
        assert_eq!(encoded('\u{10000}'), ([0xD800, 0xDC00], 2));
        assert_eq!(encoded('\u{10FFFF}'), ([0xDBFF, 0xDFFF], 2));
        assert_eq!(encoded('\u{1F600}'), ([0xD83D, 0xDE00], 2));
    }

    #[test]
    fn byte_writer_serializes_in_order() {
        let mut be = [0u8; 4];
        let mut w = ByteWriter::new(&mut be, ByteOrder::BigEndian);
        encode('\u{1F600}', &mut w);
        assert_eq!(w.written(), 2);
        assert_eq!(be, [0xD8, 0x3D, 0xDE, 0x00]);

        let mut le = [0u8; 2];
        let mut w = ByteWriter::new(&mut le, ByteOrder::LittleEndian);
        encode('\u{A9}', &mut w);
        assert_eq!(le, [0xA9, 0x00]);
    }

    #[test]
    fn unit_writer_ascii_run() {
        let mut dst = [0u16; 4];
        let mut w = UnitWriter::new(&mut dst, ByteOrder::NATIVE);
        w.push_ascii(b"abc");
        assert_eq!(w.written(), 3);
        assert_eq!(dst, [0x61, 0x62, 0x63, 0]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn unit_writer_overflow_panics() {
        let mut dst = [0u16; 1];
        let mut w = UnitWriter::new(&mut dst, ByteOrder::BigEndian);
        encode('\u{1F600}', &mut w);
    }
}
