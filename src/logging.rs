use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the `EnvFilter` directives, e.g. `ARBOR_LOG=debug`.
pub const LOG_ENV: &str = "ARBOR_LOG";

/// Logs go to stderr so that stdout carries nothing but the rendered document.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
