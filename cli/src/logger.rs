//! Tracing subscriber setup.

use crate::cli::LogFormat;
use std::io::stderr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn initialize(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(stderr)
                .with_target(false)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer().json().with_writer(stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
    }
}
