//! Type definitions for parallel processing

use crate::stats::{ProcessingStats, Stats};

/// Capacity of each of the two pipeline queues
pub const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
    pub buffer_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ParallelConfig {
    /// Worker count and queue capacity are both clamped to at least one
    pub(crate) fn normalized(&self) -> Self {
        Self {
            num_workers: self.num_workers.max(1),
            buffer_size: self.buffer_size.max(1),
        }
    }
}

/// What the dispatcher did before the line queue was closed
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DispatchReport {
    pub lines_sent: usize,
    pub interrupted: bool,
}

/// Counters a worker returns when it exits
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerReport {
    pub parsed: usize,
    pub failed: usize,
    pub blank: usize,
}

impl WorkerReport {
    pub fn merge(&mut self, other: WorkerReport) {
        self.parsed += other.parsed;
        self.failed += other.failed;
        self.blank += other.blank;
    }
}

/// Final outcome of a pipeline run, available only after every stage exited
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub stats: Stats,
    pub processing: ProcessingStats,
    /// The line queue was closed early by a shutdown request
    pub interrupted: bool,
}
