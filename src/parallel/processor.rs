//! Main parallel processor
//!
//! Contains the ParallelProcessor struct that wires the dispatcher, the
//! parser workers and the aggregator together and owns the shutdown order.

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error_log::ErrorSink;
use crate::parser::LogEntry;
use crate::platform::Ctrl;
use crate::stats::ProcessingStats;

use super::dispatch::dispatcher_thread;
use super::sink::aggregator_thread;
use super::types::{ParallelConfig, PipelineResult, WorkerReport};
use super::worker::worker_thread;

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Run every line through the parser pool and the aggregator.
    ///
    /// Returns only after the dispatcher, all workers and the aggregator have
    /// exited, in that order, so the returned `Stats` has seen every entry.
    pub fn process_lines<I>(
        &self,
        lines: I,
        error_sink: Arc<dyn ErrorSink>,
        ctrl_rx: Receiver<Ctrl>,
    ) -> Result<PipelineResult>
    where
        I: IntoIterator<Item = String> + Send + 'static,
    {
        let num_workers = self.config.num_workers;
        let mut processing = ProcessingStats::new();
        processing.workers = num_workers;

        tracing::debug!(
            workers = num_workers,
            buffer_size = self.config.buffer_size,
            "starting pipeline"
        );

        let (line_sender, line_receiver) = bounded::<String>(self.config.buffer_size);
        let (entry_sender, entry_receiver) = bounded::<LogEntry>(self.config.buffer_size);

        let aggregator_handle = thread::Builder::new()
            .name("aggregator".to_string())
            .spawn(move || aggregator_thread(entry_receiver))
            .context("Failed to spawn aggregator thread")?;

        let mut worker_handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let line_receiver = line_receiver.clone();
            let entry_sender = entry_sender.clone();
            let error_sink = Arc::clone(&error_sink);

            let handle = thread::Builder::new()
                .name(format!("parser-{}", worker_id))
                .spawn(move || worker_thread(worker_id, line_receiver, entry_sender, error_sink))
                .context("Failed to spawn parser worker")?;
            worker_handles.push(handle);
        }
        // Workers hold the only receivers now, so the dispatcher notices if they all die
        drop(line_receiver);

        let dispatch_handle = thread::Builder::new()
            .name("dispatcher".to_string())
            .spawn(move || dispatcher_thread(lines, line_sender, ctrl_rx))
            .context("Failed to spawn dispatcher thread")?;

        // 1. Dispatch finished: the line queue is closed
        let dispatch = join_stage(dispatch_handle, "dispatcher")?;

        // 2. Every worker saw the closed queue and exited
        let mut workers = WorkerReport::default();
        for handle in worker_handles {
            workers.merge(join_stage(handle, "parser worker")?);
        }

        // 3. Close the entry queue by dropping the last sender
        drop(entry_sender);

        // 4. The aggregator drained the entry queue; Stats is final
        let stats = join_stage(aggregator_handle, "aggregator")?;

        processing.lines_read = dispatch.lines_sent;
        processing.lines_parsed = workers.parsed;
        processing.lines_failed = workers.failed;
        processing.lines_blank = workers.blank;
        processing.finish();

        tracing::debug!(
            lines = processing.lines_read,
            parsed = processing.lines_parsed,
            failed = processing.lines_failed,
            interrupted = dispatch.interrupted,
            "pipeline finished"
        );

        Ok(PipelineResult {
            stats,
            processing,
            interrupted: dispatch.interrupted,
        })
    }
}

fn join_stage<T>(handle: JoinHandle<T>, stage: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("{} thread panicked", stage))
}
