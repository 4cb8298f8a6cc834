use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level` when it is set.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
