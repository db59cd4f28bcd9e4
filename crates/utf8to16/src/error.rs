use thiserror::Error;

/// The reason a UTF-8 sequence was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Utf8ErrorKind {
    /// The input ended before all continuation bytes of a multi-byte sequence
    /// were present.
    #[error("truncated sequence")]
    TruncatedSequence,
    /// A byte in a continuation position did not match `10xxxxxx`.
    #[error("invalid continuation byte")]
    InvalidContinuationByte,
    /// A byte in a lead position is neither ASCII nor a 2, 3 or 4 byte lead.
    #[error("invalid lead byte")]
    InvalidLeadByte,
    /// The sequence encodes a value that fits in fewer bytes.
    #[error("overlong encoding")]
    OverlongEncoding,
    /// The sequence encodes a value in `0xD800..=0xDFFF`.
    #[error("surrogate code point")]
    SurrogateCodePoint,
    /// The sequence encodes a value above `0x10FFFF`.
    #[error("code point too large")]
    CodePointTooLarge,
}

/// A malformed UTF-8 input, located by the offset of the first byte of the
/// offending sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at byte {offset}")]
pub struct Utf8Error {
    pub(crate) kind: Utf8ErrorKind,
    pub(crate) offset: usize,
}

impl Utf8Error {
    pub(crate) const fn new(kind: Utf8ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Why the input was rejected.
    #[must_use]
    pub const fn kind(&self) -> Utf8ErrorKind {
        self.kind
    }

    /// Byte offset of the first byte of the rejected sequence.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the valid prefix of the input.
    ///
    /// Faults are reported per sequence, so every byte before
    /// [`offset`](Self::offset) belongs to a well-formed sequence and
    /// `src[..valid_up_to()]` is valid UTF-8.
    #[must_use]
    pub const fn valid_up_to(&self) -> usize {
        self.offset
    }
}
