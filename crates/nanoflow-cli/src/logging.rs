//! Logging setup
//!
//! Log lines go to stderr so `--json` output on stdout stays parseable.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber
///
/// `RUST_LOG` selects the filter, default `info`; `json` switches to
/// line-delimited JSON records.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}

/// Initialize logging for tests
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
