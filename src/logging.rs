//! Tracing subscriber setup for the command line host

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "info";

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    /// JSON lines appended to a file
    File(PathBuf),
    /// Human readable records on stderr
    Stderr,
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as the program logs.
pub fn init_logging(output: LogOutput) -> io::Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match output {
        LogOutput::File(path) => {
            let (dir, file_name) = split_log_path(&path);
            std::fs::create_dir_all(&dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(writer).with_target(true))
                .try_init()
                .map_err(io::Error::other)?;

            Ok(Some(guard))
        }
        LogOutput::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(io::stderr).with_target(false))
                .try_init()
                .map_err(io::Error::other)?;

            Ok(None)
        }
    }
}

fn split_log_path(path: &Path) -> (PathBuf, OsString) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("force-update.log"));

    (dir, file_name)
}
