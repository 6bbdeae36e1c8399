//! Log output for the binary
//!
//! Two sinks are installed. Stderr gets warnings and above unless `RUST_LOG`
//! says otherwise (`RUST_LOG=livetype::playback=debug` follows the drive
//! loop, `trace` also shows highlighter fall-throughs). A daily file under
//! the logs directory from [`crate::config_paths::logs_dir`] always records
//! debug and above.
//!
//! Stdout is left alone: it carries the typed text.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the stderr and log-file layers. Call once, before the player is
/// built.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "livetype.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("livetype: logging to stderr only ({})", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
