//! Parallel parse-and-aggregate pipeline
//!
//! Raw lines flow through two bounded queues:
//!
//! ```text
//! dispatcher -> [line queue] -> N parser workers -> [entry queue] -> aggregator
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration, per-worker reports and the pipeline result
//! - `dispatch`: Feeds raw lines into the bounded line queue
//! - `worker`: Parser worker threads
//! - `sink`: The single aggregator thread that owns `Stats`
//! - `processor`: `ParallelProcessor` orchestration and the shutdown sequence

mod dispatch;
mod processor;
mod sink;
mod types;
mod worker;

pub use processor::ParallelProcessor;
pub use types::{ParallelConfig, PipelineResult, DEFAULT_BUFFER_SIZE};
