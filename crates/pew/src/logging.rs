use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PEW_LOG";

/// Diagnostics on stderr, filtered by `PEW_LOG` (default `warn`).
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
