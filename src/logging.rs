//! Tracing subscriber setup for the CLI
//!
//! Logs go to stderr so that rendered output on stdout stays clean.
//! `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive
///
/// `quiet` (JSON output modes) keeps only errors so that a JSON report on
/// stderr stays parseable; `verbose` wins over `quiet`.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "jobnet=debug,warn"
    } else if quiet {
        "error"
    } else {
        "jobnet=info,warn"
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
