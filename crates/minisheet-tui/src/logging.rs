use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Route tracing output to a file when one was requested.
///
/// The terminal is owned by the UI in raw mode, so nothing may write to
/// stderr. With no log file configured, tracing stays uninitialized and all
/// spans and events are no-ops. The returned guard must be kept alive for
/// the non-blocking writer to flush.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let file = std::fs::File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
