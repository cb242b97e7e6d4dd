// crates/test-utils/src/lib.rs

//! Shared fixtures for the `query` integration tests: a scripted launcher,
//! file and input builders, and the tracing/timeout harness every async
//! test runs under.

pub mod builders;
pub mod fake_launcher;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for one async test.
///
/// Launcher tests fork real children (`cat`, `grep`, `sh -c 'kill …'`) one
/// after another, and a loaded CI box can take a while to schedule each of
/// them. A hang in the wait loop still fails fast enough to be noticed.
pub const LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Filter used when `RUST_LOG` is unset: the crate's own dispatch and launch
/// events, nothing from tokio.
const DEFAULT_TEST_FILTER: &str = "query=debug";

static INIT: Once = Once::new();

/// Install a test-scoped tracing subscriber once per test binary.
///
/// Output goes through `with_test_writer()`, so the per-token `debug!`
/// events of a run only show up for failing tests (or with `--nocapture`).
/// `RUST_LOG` overrides the default `query=debug` filter.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .init();
    });
}

/// Run a dispatcher or launcher future, failing the test if it outlives
/// [`LAUNCH_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(LAUNCH_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("query run did not finish within {LAUNCH_TIMEOUT:?}; is a child stuck?"),
    }
}
