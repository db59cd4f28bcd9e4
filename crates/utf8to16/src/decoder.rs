//! Per-code-point UTF-8 state machine.
//!
//! The [`SequenceDecoder`] type is fed one byte at a time. A lead byte is
//! classified into a [`SequenceClass`] which fixes how many continuation
//! bytes must follow; each continuation byte contributes six payload bits to
//! an accumulator. When the last continuation byte arrives, the assembled
//! value is checked for overlong encodings, surrogates and the Unicode upper
//! bound, and converted to a [`char`]. After a scalar is produced or a byte is
//! rejected, the decoder is back in its initial state.
//!
//! The decoder does not know where it is in the input. Drivers remember the
//! offset of the lead byte so that faults can be reported at the start of the
//! offending sequence.
//!
//! # Errors
//!
//! - A byte that cannot start a sequence yields
//!   [`Utf8ErrorKind::InvalidLeadByte`].
//! - A byte that is not `10xxxxxx` in a continuation position yields
//!   [`Utf8ErrorKind::InvalidContinuationByte`].
//! - [`SequenceDecoder::finish`] yields [`Utf8ErrorKind::TruncatedSequence`]
//!   when input ends mid-sequence.
//! - A complete sequence may yield [`Utf8ErrorKind::OverlongEncoding`],
//!   [`Utf8ErrorKind::SurrogateCodePoint`] or
//!   [`Utf8ErrorKind::CodePointTooLarge`].

use crate::error::Utf8ErrorKind;

/// Largest Unicode scalar value.
pub(crate) const MAX_SCALAR: u32 = 0x10_FFFF;

/// Shape of a UTF-8 sequence as announced by its lead byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SequenceClass {
    /// Total sequence length in bytes, 1 through 4.
    pub len: u8,
    /// Bits of the lead byte that carry payload.
    pub payload_mask: u8,
    /// Smallest value that may legally use `len` bytes.
    pub min: u32,
}

impl SequenceClass {
    /// Classifies a lead byte, or returns `None` for continuation bytes and
    /// the `11111xxx` patterns.
    #[inline]
    pub const fn of(lead: u8) -> Option<Self> {
        match lead {
            0x00..=0x7F => Some(Self {
                len: 1,
                payload_mask: 0x7F,
                min: 0,
            }),
            0xC0..=0xDF => Some(Self {
                len: 2,
                payload_mask: 0x1F,
                min: 0x80,
            }),
            0xE0..=0xEF => Some(Self {
                len: 3,
                payload_mask: 0x0F,
                min: 0x800,
            }),
            0xF0..=0xF7 => Some(Self {
                len: 4,
                payload_mask: 0x07,
                min: 0x1_0000,
            }),
            _ => None,
        }
    }
}

#[inline]
pub(crate) const fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Applies the post-assembly checks to a decoded value.
#[inline]
pub(crate) fn check_scalar(value: u32, min: u32) -> Result<char, Utf8ErrorKind> {
    if value < min {
        return Err(Utf8ErrorKind::OverlongEncoding);
    }
    match char::from_u32(value) {
        Some(ch) => Ok(ch),
        None if value > MAX_SCALAR => Err(Utf8ErrorKind::CodePointTooLarge),
        None => Err(Utf8ErrorKind::SurrogateCodePoint),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    ExpectLead,
    ExpectCont {
        remaining: u8,
        min: u32,
    },
}

/// Accumulates the bytes of one UTF-8 sequence and decodes them into a
/// [`char`].
#[derive(Debug, Default, Clone)]
pub(crate) struct SequenceDecoder {
    state: State,
    acc: u32,
}

impl SequenceDecoder {
    pub const fn new() -> Self {
        Self {
            state: State::ExpectLead,
            acc: 0,
        }
    }

    /// Whether the next byte will be treated as a lead byte.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, State::ExpectLead)
    }

    /// Feeds a single byte.
    ///
    /// - Returns `Ok(None)` while a multi-byte sequence is incomplete.
    /// - Returns `Ok(Some(ch))` once a sequence is complete and valid.
    /// - Returns `Err` on the first byte or assembled value that breaks the
    ///   UTF-8 grammar. The decoder is idle again after any `Err`.
    #[inline]
    pub fn feed(&mut self, b: u8) -> Result<Option<char>, Utf8ErrorKind> {
        match self.state {
            State::ExpectLead => {
                if b < 0x80 {
                    return Ok(Some(char::from(b)));
                }
                let class = SequenceClass::of(b).ok_or(Utf8ErrorKind::InvalidLeadByte)?;
                self.acc = u32::from(b & class.payload_mask);
                self.state = State::ExpectCont {
                    remaining: class.len - 1,
                    min: class.min,
                };
                Ok(None)
            }
            State::ExpectCont { remaining, min } => {
                if !is_continuation(b) {
                    self.reset();
                    return Err(Utf8ErrorKind::InvalidContinuationByte);
                }
                self.acc = (self.acc << 6) | u32::from(b & 0x3F);
                if remaining > 1 {
                    self.state = State::ExpectCont {
                        remaining: remaining - 1,
                        min,
                    };
                    return Ok(None);
                }

                let value = self.acc;
                self.reset();
                check_scalar(value, min).map(Some)
            }
        }
    }

    /// Signals end of input.
    #[inline]
    pub fn finish(&self) -> Result<(), Utf8ErrorKind> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(Utf8ErrorKind::TruncatedSequence)
        }
    }

    /// Drops any partially assembled sequence.
    pub fn reset(&mut self) {
        self.state = State::ExpectLead;
        self.acc = 0;
    }
}
