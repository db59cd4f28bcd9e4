//! Properties over arbitrary bytes: the length pass and the conversion pass
//! agree, every engine agrees with the baseline, and acceptance matches
//! `core::str::from_utf8`.

use std::vec::Vec;

use quickcheck::QuickCheck;

use super::{arbitrary::Corrupted, trials};
use crate::{ByteOrder, EngineKind, Scalar, UnitWriter, Utf8Error, engine::Engine};

type Outcome = (Result<usize, Utf8Error>, Result<usize, Utf8Error>, Vec<u16>);

fn run(engine: EngineKind, src: &[u8]) -> Outcome {
    // One unit per input byte always suffices.
    let mut dst = std::vec![0u16; src.len()];
    let len = engine.utf16_len(src);
    let converted = engine.convert(src, &mut UnitWriter::new(&mut dst, ByteOrder::BigEndian));
    if let Ok(n) = converted {
        dst.truncate(n);
    }
    (len, converted, dst)
}

fn agrees(src: &[u8]) -> bool {
    let (len, converted, units) = run(EngineKind::Scalar, src);
    if len != converted {
        return false;
    }

    let engines_agree = EngineKind::ALL.into_iter().all(|engine| {
        let (other_len, other_converted, other_units) = run(engine, src);
        other_len == len
            && other_converted == converted
            && (converted.is_err() || other_units == units)
    });

    let matches_core = match core::str::from_utf8(src) {
        Ok(s) => {
            let expected: Vec<u16> = s.encode_utf16().map(u16::to_be).collect();
            len == Ok(expected.len()) && units == expected
        }
        Err(e) => len.err().map(|err| err.valid_up_to()) == Some(e.valid_up_to()),
    };

    engines_agree && matches_core
}

#[test]
fn length_and_conversion_agree_on_arbitrary_bytes() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: Vec<u8>) -> bool {
        agrees(&src)
    }

    QuickCheck::new()
        .tests(trials())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn length_and_conversion_agree_on_corrupted_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: Corrupted) -> bool {
        agrees(&src.0)
    }

    QuickCheck::new()
        .tests(trials())
        .quickcheck(prop as fn(Corrupted) -> bool);
}

#[test]
fn every_two_byte_input_agrees() {
    for a in 0..=u8::MAX {
        for b in 0..=u8::MAX {
            assert!(agrees(&[a, b]), "{a:#04X} {b:#04X}");
        }
    }
}

#[test]
fn every_three_byte_prefix_agrees() {
    // Covers every lead byte followed by every pair of interesting bytes.
    const INTERESTING: [u8; 12] = [
        0x00, 0x41, 0x7F, 0x80, 0x8F, 0x90, 0x9F, 0xA0, 0xBF, 0xC0, 0xE0, 0xFF,
    ];
    for lead in 0..=u8::MAX {
        for &b in &INTERESTING {
            for &c in &INTERESTING {
                let src = [lead, b, c, 0x80];
                assert!(agrees(&src[..3]), "{:02X?}", &src[..3]);
                assert!(agrees(&src), "{src:02X?}");
            }
        }
    }
}

#[test]
fn scalar_engine_is_the_baseline() {
    let src = "baseline \u{FEFF}\u{10000}".as_bytes();
    assert_eq!(Scalar.utf16_len(src), EngineKind::Scalar.utf16_len(src));
}
