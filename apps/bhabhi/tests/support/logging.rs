//! Logging for integration test binaries.
//!
//! Mirrors the crate's test bootstrap, which integration tests cannot reach.
//! Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`:
//!
//! ```bash
//! TEST_LOG=debug cargo test -p bhabhi --test game_flow_lifecycle_test -- --nocapture
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    init();
}
