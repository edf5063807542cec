use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Where diagnostic output goes and how detailed it is.
#[derive(Debug, Clone, Copy)]
pub struct LogOptions<'a> {
    /// Directory for the rotating log file; `None` disables file logging
    pub log_dir: Option<&'a Utf8Path>,
    /// Prefix for log files (e.g., "csgo-patcher")
    pub log_prefix: &'a str,
    /// If true, use debug level and echo diagnostics to stderr
    pub debug_mode: bool,
}

/// Setup diagnostic logging.
///
/// Installs two `tracing` layers:
/// - stderr, filtered by `RUST_LOG` when set, otherwise `debug` in debug mode and off
///   in normal runs (the [`Console`](crate::Console) already shows user-facing text)
/// - a daily rotating file in `log_dir`, when one is configured
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file logging
/// active, or `None` when file logging is disabled
pub fn setup_logging(options: &LogOptions<'_>) -> Result<Option<WorkerGuard>> {
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if options.debug_mode {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("off")
        }
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match options.log_dir {
        Some(log_dir) => {
            prepare_log_dir(log_dir)?;

            // Create daily rotating file appender
            let file_appender = rolling::daily(log_dir, options.log_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_filter = if options.debug_mode {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            };

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI codes in log files
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(file_filter);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={:?}, prefix={}, debug={}",
        options.log_dir,
        options.log_prefix,
        options.debug_mode
    );

    Ok(guard)
}

/// Create the log directory if it doesn't exist.
pub fn prepare_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}
