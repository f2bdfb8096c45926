use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "profile-tui.log";

/// Keeps the non-blocking writer flushing until dropped.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// File-only logging: the terminal belongs to the TUI.
///
/// If the log directory can't be created, logging is disabled and the reason
/// is returned for the caller to report once the terminal is restored.
pub fn init_logging(log_dir: &Path) -> (LoggingGuard, Option<String>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Err(err) = std::fs::create_dir_all(log_dir) {
        let warning = format!("File logging disabled ({}): {}", log_dir.display(), err);
        return (LoggingGuard { _file_guard: None }, Some(warning));
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .compact()
                .with_writer(file_writer),
        )
        .try_init()
        .ok();

    (
        LoggingGuard {
            _file_guard: Some(guard),
        },
        None,
    )
}
