pub mod builders;

use std::sync::Once;

use joblaunch::logging::LOG_ENV;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test and only
///   shown for failing tests (unless you run with `-- --nocapture`).
/// - Reads the same `JOBLAUNCH_LOG` variable as the binary, then
///   `RUST_LOG`, and defaults to `warn` so skipped candidates show up.
///
/// e.g. `JOBLAUNCH_LOG=joblaunch::registry=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}
