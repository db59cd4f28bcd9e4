use super::{Count, Emit, Engine, EngineKind, Visitor, fault};
use crate::{
    decoder::SequenceDecoder,
    encoder::Utf16Sink,
    error::Utf8Error,
};

/// Portable baseline engine: every byte goes through the sequence decoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scalar;

/// Feeds `src` through a [`SequenceDecoder`], reporting faults at the offset
/// of the lead byte of the offending sequence.
#[inline]
fn walk<V: Visitor>(src: &[u8], visitor: &mut V) -> Result<(), Utf8Error> {
    let mut decoder = SequenceDecoder::new();
    let mut start = 0;
    for (pos, &b) in src.iter().enumerate() {
        if decoder.is_idle() {
            start = pos;
        }
        match decoder.feed(b) {
            Ok(Some(ch)) => visitor.scalar(ch),
            Ok(None) => {}
            Err(kind) => return Err(fault(kind, start)),
        }
    }
    decoder.finish().map_err(|kind| fault(kind, start))
}

impl Engine for Scalar {
    const KIND: EngineKind = EngineKind::Scalar;

    fn utf16_len(&self, src: &[u8]) -> Result<usize, Utf8Error> {
        let mut count = Count(0);
        walk(src, &mut count)?;
        Ok(count.0)
    }

    fn convert<S: Utf16Sink + ?Sized>(
        &self,
        src: &[u8],
        sink: &mut S,
    ) -> Result<usize, Utf8Error> {
        let before = sink.written();
        walk(src, &mut Emit(&mut *sink))?;
        Ok(sink.written() - before)
    }
}
