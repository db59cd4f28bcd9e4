mod property_agreement;

/// Number of cases each quickcheck property runs.
pub(crate) fn trials() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    tests
}
