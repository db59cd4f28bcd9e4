use crate::{byte_order::ByteOrder, engine::EngineChoice};

/// Configuration for a [`Transcoder`](crate::Transcoder).
///
/// # Default
///
/// Big-endian output from an automatically selected engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TranscodeOptions {
    /// Byte order of the produced UTF-16 code units.
    ///
    /// # Default
    ///
    /// [`ByteOrder::BigEndian`]
    pub byte_order: ByteOrder,

    /// Which engine performs the work.
    ///
    /// # Default
    ///
    /// [`EngineChoice::Auto`]
    pub engine: EngineChoice,
}
