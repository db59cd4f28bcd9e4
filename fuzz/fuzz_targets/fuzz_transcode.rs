#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use utf8to16::{ByteOrder, EngineChoice, EngineKind, TranscodeOptions, Transcoder};

const HEADER: usize = 1; // flags

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Scalar values biased towards sequence-length boundaries, where engines are
/// most likely to disagree.
#[derive(Debug)]
struct EdgyChar(char);

impl<'a> Arbitrary<'a> for EdgyChar {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        const EDGES: &[u32] = &[
            0x00, 0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xE000, 0xFFFD, 0xFFFF, 0x1_0000,
            0x1_F600, 0x10_FFFF,
        ];
        let ch = if u.ratio(1, 3)? {
            char::from_u32(*u.choose(EDGES)?).ok_or(arbitrary::Error::IncorrectFormat)?
        } else {
            u.arbitrary()?
        };
        Ok(EdgyChar(ch))
    }
}

/// Writes well-formed UTF-8 into `buf`, occasionally damaging one byte so the
/// fault paths are reached from mostly valid input.
fn append_text(buf: &mut [u8], limit: usize) -> usize {
    let bytes: Vec<u8> = with_rng(|rng| (0..limit.max(1) * 2).map(|_| rng.random()).collect());
    let Ok(chars) = Vec::<EdgyChar>::arbitrary(&mut Unstructured::new(&bytes)) else {
        return 0;
    };

    let mut written = 0;
    let mut tmp = [0u8; 4];
    for EdgyChar(ch) in chars {
        let enc = ch.encode_utf8(&mut tmp).as_bytes();
        if written + enc.len() > limit {
            break;
        }
        buf[written..written + enc.len()].copy_from_slice(enc);
        written += enc.len();
    }

    if written > 0 && with_rng(|rng| rng.random_ratio(1, 4)) {
        let (at, byte) = with_rng(|rng| (rng.random_range(0..written), rng.random()));
        buf[at] = byte;
    }
    written
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.random::<u8>() & 0x1);
        HEADER + append_text(&mut data[HEADER..], max_size - HEADER)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn transcode(data: &[u8]) {
    let Some((&flags, src)) = data.split_first() else {
        return;
    };
    let byte_order = if flags & 1 == 0 {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };

    let expected = std::str::from_utf8(src);
    let mut outputs = Vec::new();

    for engine in EngineKind::ALL {
        let t = Transcoder::new(TranscodeOptions {
            byte_order,
            engine: EngineChoice::Fixed(engine),
        });

        let len = t.utf16_len(src);
        let mut dst = vec![0u16; len.unwrap_or(src.len())];
        let converted = t.convert(src, &mut dst);
        assert_eq!(len, converted, "{engine}: length pass disagrees with conversion");

        match (&expected, converted) {
            (Ok(s), Ok(n)) => {
                assert_eq!(n, s.encode_utf16().count());
                for (unit, want) in dst.iter().zip(s.encode_utf16()) {
                    assert_eq!(byte_order.load(*unit), want);
                }
            }
            (Err(e), Err(err)) => {
                assert_eq!(err.valid_up_to(), e.valid_up_to(), "{engine}: fault offset");
            }
            (want, got) => panic!("{engine}: expected {want:?}, got {got:?}"),
        }
        outputs.push((converted, dst));
    }

    let (first, rest) = outputs.split_first().unwrap();
    for other in rest {
        assert_eq!(first.0, other.0, "engines disagree on the result");
        if let Ok(n) = first.0 {
            assert_eq!(first.1[..n], other.1[..n], "engines disagree on output");
        }
    }
}

fuzz_target!(|data: &[u8]| transcode(data));
