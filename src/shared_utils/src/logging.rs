//! Tracing subscriber setup for the command-line tools.

use tracing_subscriber::EnvFilter;

/// Install a human-readable fmt subscriber writing to stderr.
///
/// The filter is read from the environment variable `env_var` (e.g.
/// `PRICE_OUTLIERS_LOG=debug`) and falls back to `default_filter` when unset
/// or unparsable. Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(env_var: &str, default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(env_var).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
