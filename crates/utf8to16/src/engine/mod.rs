//! Interchangeable transcoding engines.
//!
//! Every engine implements the same capability set: estimate the UTF-16
//! length of a UTF-8 buffer, convert it, and swap the byte order of produced
//! units. Engines must agree exactly: same counts, same output, and the same
//! fault at the same offset for every input.
//!
//! [`EngineKind`] names the engines and dispatches to them by value;
//! [`EngineChoice`] is the configuration-side view that may defer the choice
//! to the runtime (see [`EngineChoice::resolve`]).

mod scalar;
mod swar;

use core::{fmt, str::FromStr};

pub use scalar::Scalar;
pub use swar::Swar;
use thiserror::Error;

use crate::{
    byte_order::{swap_utf16_byte_order, swap_utf16_byte_order_in_place},
    encoder::{Utf16Sink, encode, units_for},
    error::{Utf8Error, Utf8ErrorKind},
};

/// The transcoding capability set.
pub trait Engine: Copy + fmt::Debug + Send + Sync + 'static {
    /// Which engine this is.
    const KIND: EngineKind;

    /// Returns the number of UTF-16 code units [`convert`](Self::convert)
    /// would write for `src`.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`, exactly as `convert` would.
    fn utf16_len(&self, src: &[u8]) -> Result<usize, Utf8Error>;

    /// Decodes `src` and pushes its UTF-16 encoding into `sink`, returning the
    /// number of units pushed by this call.
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`. Nothing is pushed for the faulting
    /// sequence or anything after it.
    fn convert<S: Utf16Sink + ?Sized>(&self, src: &[u8], sink: &mut S)
    -> Result<usize, Utf8Error>;

    /// Swaps the byte order of every unit of `src` into `dst`.
    fn swap_byte_order(&self, src: &[u16], dst: &mut [u16]) {
        swap_utf16_byte_order(src, dst);
    }

    /// Swaps the byte order of every unit of `buf` in place.
    fn swap_byte_order_in_place(&self, buf: &mut [u16]) {
        swap_utf16_byte_order_in_place(buf);
    }
}

/// What an engine does with each decoded piece of input.
///
/// Length estimation and conversion walk the input identically and differ
/// only in their visitor, so the two passes cannot disagree on which inputs
/// they accept.
pub(crate) trait Visitor {
    /// A run of ASCII bytes, each of which is one code unit.
    fn ascii_run(&mut self, run: &[u8]);
    /// One validated scalar value.
    fn scalar(&mut self, ch: char);
}

/// Counts code units.
#[derive(Debug, Default)]
pub(crate) struct Count(pub usize);

impl Visitor for Count {
    #[inline]
    fn ascii_run(&mut self, run: &[u8]) {
        self.0 += run.len();
    }

    #[inline]
    fn scalar(&mut self, ch: char) {
        self.0 += units_for(ch);
    }
}

/// Encodes into a sink.
pub(crate) struct Emit<'s, S: ?Sized>(pub &'s mut S);

impl<S: Utf16Sink + ?Sized> Visitor for Emit<'_, S> {
    #[inline]
    fn ascii_run(&mut self, run: &[u8]) {
        self.0.push_ascii(run);
    }

    #[inline]
    fn scalar(&mut self, ch: char) {
        encode(ch, &mut *self.0);
    }
}

#[cold]
pub(crate) fn fault(kind: Utf8ErrorKind, offset: usize) -> Utf8Error {
    Utf8Error::new(kind, offset)
}

/// A concrete engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Byte-at-a-time portable baseline.
    Scalar,
    /// Word-at-a-time engine that skips ASCII runs eight bytes at a time.
    Swar,
}

impl EngineKind {
    /// Every engine, baseline first.
    pub const ALL: [Self; 2] = [Self::Scalar, Self::Swar];

    /// The fastest engine available on this target.
    #[must_use]
    pub const fn best() -> Self {
        Self::Swar
    }

    /// The lowercase name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Swar => "swar",
        }
    }

    /// See [`Engine::utf16_len`].
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`.
    pub fn utf16_len(self, src: &[u8]) -> Result<usize, Utf8Error> {
        match self {
            Self::Scalar => Scalar.utf16_len(src),
            Self::Swar => Swar.utf16_len(src),
        }
    }

    /// See [`Engine::convert`].
    ///
    /// # Errors
    ///
    /// Returns the first fault in `src`.
    pub fn convert<S: Utf16Sink + ?Sized>(
        self,
        src: &[u8],
        sink: &mut S,
    ) -> Result<usize, Utf8Error> {
        match self {
            Self::Scalar => Scalar.convert(src, sink),
            Self::Swar => Swar.convert(src, sink),
        }
    }

    /// See [`Engine::swap_byte_order`].
    pub fn swap_byte_order(self, src: &[u16], dst: &mut [u16]) {
        match self {
            Self::Scalar => Scalar.swap_byte_order(src, dst),
            Self::Swar => Swar.swap_byte_order(src, dst),
        }
    }

    /// See [`Engine::swap_byte_order_in_place`].
    pub fn swap_byte_order_in_place(self, buf: &mut [u16]) {
        match self {
            Self::Scalar => Scalar.swap_byte_order_in_place(buf),
            Self::Swar => Swar.swap_byte_order_in_place(buf),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An engine name that is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown engine (expected `scalar` or `swar`)")]
pub struct UnknownEngine;

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| s.trim().eq_ignore_ascii_case(kind.name()))
            .ok_or(UnknownEngine)
    }
}

/// How a [`Transcoder`](crate::Transcoder) picks its engine.
///
/// # Default
///
/// [`EngineChoice::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineChoice {
    /// Let the runtime decide.
    #[default]
    Auto,
    /// Always use the given engine.
    Fixed(EngineKind),
}

/// Environment variable consulted by [`EngineChoice::Auto`] when the `std`
/// feature is enabled.
pub const ENGINE_ENV_VAR: &str = "UTF8TO16_ENGINE";

impl EngineChoice {
    /// Picks the engine.
    ///
    /// `Auto` selects [`EngineKind::best`], unless the `std` feature is
    /// enabled and [`ENGINE_ENV_VAR`] names an engine. The environment is read
    /// once per process.
    #[must_use]
    pub fn resolve(self) -> EngineKind {
        match self {
            Self::Fixed(kind) => kind,
            Self::Auto => auto(),
        }
    }
}

impl From<EngineKind> for EngineChoice {
    fn from(kind: EngineKind) -> Self {
        Self::Fixed(kind)
    }
}

#[cfg(feature = "std")]
fn auto() -> EngineKind {
    static AUTO: std::sync::OnceLock<EngineKind> = std::sync::OnceLock::new();

    *AUTO.get_or_init(|| {
        let kind = match std::env::var(ENGINE_ENV_VAR) {
            Ok(name) => name.parse().unwrap_or_else(|err| {
                log::warn!("ignoring {ENGINE_ENV_VAR}={name:?}: {err}");
                EngineKind::best()
            }),
            Err(_) => EngineKind::best(),
        };
        log::debug!("selected {kind} engine");
        kind
    })
}

#[cfg(not(feature = "std"))]
fn auto() -> EngineKind {
    EngineKind::best()
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("scalar".parse(), Ok(EngineKind::Scalar));
        assert_eq!(" SWAR ".parse(), Ok(EngineKind::Swar));
        assert_eq!("avx512".parse::<EngineKind>(), Err(UnknownEngine));
    }

    #[test]
    fn display_round_trips() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn fixed_choice_wins() {
        assert_eq!(EngineChoice::Fixed(EngineKind::Scalar).resolve(), EngineKind::Scalar);
        assert_eq!(EngineChoice::from(EngineKind::Swar).resolve(), EngineKind::Swar);
    }

    #[test]
    fn auto_is_stable() {
        let first = EngineChoice::Auto.resolve();
        assert!(EngineKind::ALL.contains(&first));
        assert_eq!(EngineChoice::Auto.resolve(), first);
    }

    #[test]
    fn kind_constants_match() {
        assert_eq!(Scalar::KIND, EngineKind::Scalar);
        assert_eq!(Swar::KIND, EngineKind::Swar);
    }
}
