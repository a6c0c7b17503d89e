//! Aggregator thread: the single writer of `Stats`

use crossbeam_channel::Receiver;

use crate::parser::LogEntry;
use crate::stats::Stats;

/// Ingest entries in arrival order until every worker has dropped its sender.
///
/// `Stats` is created and mutated here only; it leaves the thread through the
/// join handle once the entry queue is closed and drained.
pub(crate) fn aggregator_thread(entry_receiver: Receiver<LogEntry>) -> Stats {
    let mut stats = Stats::new();

    for entry in entry_receiver.iter() {
        stats.ingest(&entry);
    }

    tracing::debug!(total_lines = stats.total_lines(), "aggregator drained entry queue");
    stats
}
