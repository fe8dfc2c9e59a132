//! Tracing subscriber setup for the command-line front-end.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary (or to an embedding host).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "NPM_GRAPH_LOG";

/// Builds the filter: `NPM_GRAPH_LOG` if set and valid, else `default`.
pub fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Fallback filter directive when `NPM_GRAPH_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs a compact stderr subscriber.
///
/// Output goes to stderr so a graph written to stdout stays parseable.
/// Calling this twice is harmless; the second install is ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive(verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
