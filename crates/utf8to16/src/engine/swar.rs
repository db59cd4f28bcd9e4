use super::{Count, Emit, Engine, EngineKind, Visitor, fault};
use crate::{
    decoder::SequenceDecoder,
    encoder::Utf16Sink,
    error::Utf8Error,
};

const WORD: usize = size_of::<u64>();
const NON_ASCII: u64 = 0x8080_8080_8080_8080;

/// Word-at-a-time engine.
///
/// Between sequences, ASCII is detected eight bytes at a time and handed to
/// the sink as a run. Everything else goes through the same sequence decoder
/// as [`Scalar`](super::Scalar), so faults are reported at identical offsets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Swar;

/// Length of the all-ASCII prefix of `bytes`.
#[inline]
pub(crate) fn ascii_prefix_len(bytes: &[u8]) -> usize {
    let mut len = 0;
    for chunk in bytes.chunks_exact(WORD) {
        let Ok(word) = <[u8; WORD]>::try_from(chunk) else {
            break;
        };
        if u64::from_ne_bytes(word) & NON_ASCII != 0 {
            break;
        }
        len += WORD;
    }
    len + bytes[len..].iter().take_while(|b| b.is_ascii()).count()
}

#[inline]
fn walk<V: Visitor>(src: &[u8], visitor: &mut V) -> Result<(), Utf8Error> {
    let mut decoder = SequenceDecoder::new();
    let mut start = 0;
    let mut pos = 0;
    while pos < src.len() {
        if decoder.is_idle() {
            let run = ascii_prefix_len(&src[pos..]);
            if run > 0 {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    src[pos..pos + run].is_ascii(),
                    "Internal error: word scan accepted a non-ASCII byte"
                );
                visitor.ascii_run(&src[pos..pos + run]);
                pos += run;
                continue;
            }
            start = pos;
        }
        match decoder.feed(src[pos]) {
            Ok(Some(ch)) => visitor.scalar(ch),
            Ok(None) => {}
            Err(kind) => return Err(fault(kind, start)),
        }
        pos += 1;
    }
    decoder.finish().map_err(|kind| fault(kind, start))
}

impl Engine for Swar {
    const KIND: EngineKind = EngineKind::Swar;

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
