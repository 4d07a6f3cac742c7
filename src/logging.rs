use anyhow::Context;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Level for the terminal layer. Quiet mode still lets errors through.
pub fn console_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

fn file_filter(verbose: u8) -> EnvFilter {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs stderr and file logging. The returned guard flushes the file
/// writer when dropped, so keep it alive until the process exits.
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    verbose: u8,
    quiet: bool,
) -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .without_time()
                .with_target(false)
                .with_filter(console_level(verbose, quiet)),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter(verbose)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Logging to {}", log_dir.join(log_file).display());

    Ok(guard)
}
