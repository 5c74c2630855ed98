//! Logging bootstrap for the `enigma` binary.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "enigma.log";

/// Installs the global subscriber.
///
/// Logs go to stderr (stdout carries command output) and, when `logs_dir`
/// can be created, to a daily rolling file in it. Verbosity comes from
/// `RUST_LOG`, defaulting to `info`.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of `main`.
pub fn init(logs_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match logs_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
