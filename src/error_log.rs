//! Diagnostic sink for lines the parser rejected
//!
//! Parse failures never reach the caller. Workers hand them to an
//! [`ErrorSink`]; the default one turns them into `tracing` events that land
//! in the error log file.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::parser::ParseFailure;

/// Environment variable holding an `EnvFilter` directive for the error log
pub const LOG_FILTER_ENV: &str = "LOG_ANALYZER_LOG";

/// Default error log file, relative to the working directory
pub const DEFAULT_ERROR_LOG: &str = "errors.log";

/// Receiver of `(raw line, reason)` pairs from the parser workers
pub trait ErrorSink: Send + Sync {
    fn report(&self, failure: &ParseFailure);
}

/// Emits one `error` event per rejected line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, failure: &ParseFailure) {
        tracing::error!(line = %failure.line, error = %failure.reason, "parse failed");
    }
}

/// Drops every failure
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn report(&self, _failure: &ParseFailure) {}
}

/// Keeps failures in memory, mostly useful for tests and library callers
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<ParseFailure>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<ParseFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for CollectingSink {
    fn report(&self, failure: &ParseFailure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure.clone());
        }
    }
}

/// Where parse failures are written; `None` disables the file entirely
#[derive(Debug, Clone)]
pub struct ErrorLogConfig {
    pub path: Option<PathBuf>,
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
        }
    }
}

/// Install the global subscriber that appends to the error log file.
///
/// The returned guard flushes the background writer when dropped, so it must
/// live until the pipeline has finished.
pub fn init_error_log(config: &ErrorLogConfig) -> Result<Option<WorkerGuard>> {
    let Some(path) = config.path.as_deref() else {
        return Ok(None);
    };

    let file = open_append(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install error log subscriber: {}", e))?;

    Ok(Some(guard))
}

fn open_append(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open error log file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use tempfile::tempdir;

    #[test]
    fn test_collecting_sink_keeps_failures() {
        let sink = CollectingSink::new();
        let failure = parse_line("not a log line").unwrap_err();

        sink.report(&failure);
        sink.report(&failure);

        let failures = sink.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].line, "not a log line");
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        let failure = parse_line("").unwrap_err();
        NullSink.report(&failure);
        TracingErrorSink.report(&failure);
    }

    #[test]
    fn test_disabled_error_log_installs_nothing() {
        let guard = init_error_log(&ErrorLogConfig { path: None }).unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_open_append_reports_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("errors.log");

        let err = open_append(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open error log file"));
    }

    #[test]
    fn test_open_append_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("errors.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        {
            use std::io::Write;
            let mut file = open_append(&path).unwrap();
            writeln!(file, "this run").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier run\nthis run\n");
    }
}
