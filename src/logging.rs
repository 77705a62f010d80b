//! Sets up `tracing` output for the command line tools.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global tracing subscriber.
///
/// Events are written to stderr, filtered by `RUST_LOG` (`warn` if unset).
/// If `log_path` is given, events at `debug` and above are also appended to
/// that file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn setup_logging(log_path: Option<&Path>) -> Result<(), io::Error> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(env_filter);

    let debug_log = match log_path {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}
