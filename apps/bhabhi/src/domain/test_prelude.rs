use std::env;

use proptest::prelude::ProptestConfig;

/// Proptest config; raise cases locally with `PROPTEST_CASES=800`.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(32);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
