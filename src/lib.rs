//! Core library for log-analyzer
//!
//! Reads access logs, parses every line on a pool of worker threads and folds
//! the entries into a single [`Stats`] summary owned by one aggregator thread.

pub mod cli;
pub mod config;
pub mod decompression;
pub mod error_log;
pub mod parallel;
pub mod parser;
pub mod platform;
pub mod readers;
pub mod stats;

pub use config::AnalyzerConfig;
pub use error_log::{CollectingSink, ErrorSink, NullSink, TracingErrorSink};
pub use parallel::{ParallelConfig, ParallelProcessor, PipelineResult};
pub use parser::{parse_line, LogEntry, ParseErrorKind, ParseFailure};
pub use stats::{ExportError, ProcessingStats, Stats};

use anyhow::Result;
use crossbeam_channel::Receiver;
use std::sync::Arc;

use platform::Ctrl;

/// Load every input, then run the parse-and-aggregate pipeline over it.
///
/// Unreadable inputs fail the whole run before any thread is started. Parse
/// failures never do; they only reach `error_sink`.
pub fn run_analysis(
    config: &AnalyzerConfig,
    error_sink: Arc<dyn ErrorSink>,
    ctrl_rx: Receiver<Ctrl>,
) -> Result<PipelineResult> {
    let input = readers::read_input_lines(&config.input.paths, &config.input.file_order)?;
    let files_read = input.files_read;

    let processor = ParallelProcessor::new(config.parallel_config());
    let mut result = processor.process_lines(input.lines, error_sink, ctrl_rx)?;
    result.processing.files_processed = files_read;

    Ok(result)
}
