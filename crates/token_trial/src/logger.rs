use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber: human readable lines on stderr, filtered by
/// `RUST_LOG` and defaulting to `info`. Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
