use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize file-based logging for the TUI.
///
/// Logs go to `<logs_dir>/mixo.log.<date>` so they never draw over the
/// terminal UI. Level is controlled with RUST_LOG (default: info). The
/// returned guard must be held until exit to flush buffered lines.
pub fn init_file_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = fs::create_dir_all(logs_dir) {
        eprintln!("warning: could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, "mixo.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .is_ok();

    installed.then_some(guard)
}

/// Initialize stderr logging for CLI commands (default: warn).
pub fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
