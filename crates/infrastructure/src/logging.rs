//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber for the binary.
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]. Calling it
/// twice is harmless; the second call returns `false`.
pub fn init_tracing() -> bool {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Installs a subscriber that writes through the test harness capture.
///
/// Safe to call from every test.
pub fn init_test_tracing() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}
