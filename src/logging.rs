use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Logs to a daily-rolling `tickbox.log` in `log_dir`; the terminal belongs to
/// the TUI. Returns the writer guard, which must outlive the app so buffered
/// lines get flushed. Returns None (logging off) if the directory can't be created.
pub fn init_file_logging(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "warning: logging disabled, could not create {}: {}",
            log_dir.display(),
            e
        );
        return None;
    }

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tickbox.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return None;
    }
    tracing::info!("logging initialized at {}", log_dir.display());
    Some(guard)
}

/// Plain stderr logging for non-interactive subcommands.
pub fn init_stderr_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
