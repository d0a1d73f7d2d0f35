//! Logging setup.

use std::fs;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with daily-rotated file output.
///
/// The form UI owns stdout while raw mode is active, so there is no console
/// layer; everything goes to `logs/enroll.log`. `RUST_LOG` overrides the
/// default `enroll_desk=info` filter.
pub fn init_logging() {
    // Ensure logs directory exists
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "enroll.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("enroll_desk=info".parse().unwrap()))
        .with(file_layer)
        .init();

    // We need to keep the guard in scope to ensure logs are flushed on exit
    std::mem::forget(_guard);
}
