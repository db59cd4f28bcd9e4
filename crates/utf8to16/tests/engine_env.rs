#![expect(missing_docs)]
#![cfg(feature = "std")]

use utf8to16::{ENGINE_ENV_VAR, EngineKind, Transcoder};

// Kept alone in its own test binary: the automatic engine choice is read
// from the environment once per process.
#[test]
fn auto_engine_honours_environment() {
    // SAFETY: no other thread of this test binary reads the environment.
    unsafe { std::env::set_var(ENGINE_ENV_VAR, "scalar") };
    assert_eq!(Transcoder::default().engine(), EngineKind::Scalar);
}
