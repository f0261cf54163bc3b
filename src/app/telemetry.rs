//! Tracing setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Initialize the global subscriber writing to stderr.
///
/// The `--log-level` flag takes priority over `RUST_LOG`; without either
/// only warnings and errors are shown, so regular output stays readable.
pub fn init(log_level: Option<Level>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
