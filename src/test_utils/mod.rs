//! Test utilities for scaffold
//!
//! Shared helpers for unit and integration tests: logging setup and fixtures that
//! lay out projects and registries in temporary directories.
//!
//! Enabled for the crate's own tests and, through the `test-utils` feature, for
//! the integration tests under `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use scaffold_cli::test_utils::{ProjectFixture, init_test_logging};
//! use tempfile::TempDir;
//!
//! init_test_logging(None);
//! let temp = TempDir::new().unwrap();
//! ProjectFixture::new("foxcache").uses(&["hookless"]).write(temp.path());
//! ```

pub mod fixtures;

pub use fixtures::{ProjectFixture, SAMPLE_REGISTRY, write_project};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a tracing subscriber that writes through the test harness.
///
/// With `level` unset, logging is enabled only when `RUST_LOG` is set. Only the
/// first call in a test binary has any effect.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
