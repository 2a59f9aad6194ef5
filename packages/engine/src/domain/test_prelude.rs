//! Shared configuration for domain tests.

use proptest::prelude::ProptestConfig;
use tracing_subscriber::EnvFilter;

/// Default proptest configuration for domain properties.
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Opt-in log output for debugging test runs (`RUST_LOG=debug`).
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
