//! Parser worker threads

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

use crate::error_log::ErrorSink;
use crate::parser::{is_blank, parse_line, LogEntry};

use super::types::WorkerReport;

/// Worker thread: parses lines until the line queue is closed and drained.
///
/// Successful entries go to the aggregator; failures go to the error sink and
/// are otherwise dropped. Workers share no state with each other.
pub(crate) fn worker_thread(
    worker_id: usize,
    line_receiver: Receiver<String>,
    entry_sender: Sender<LogEntry>,
    error_sink: Arc<dyn ErrorSink>,
) -> WorkerReport {
    let mut report = WorkerReport::default();

    for line in line_receiver.iter() {
        if is_blank(&line) {
            report.blank += 1;
            continue;
        }

        match parse_line(&line) {
            Ok(entry) => {
                // Blocks while the entry queue is full
                if entry_sender.send(entry).is_err() {
                    tracing::warn!(worker_id, "entry queue closed early, worker exiting");
                    break;
                }
                report.parsed += 1;
            }
            Err(failure) => {
                report.failed += 1;
                error_sink.report(&failure);
            }
        }
    }

    tracing::debug!(
        worker_id,
        parsed = report.parsed,
        failed = report.failed,
        blank = report.blank,
        "parser worker finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_log::CollectingSink;
    use crate::parser::ParseErrorKind;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_worker_routes_entries_and_failures() {
        let (line_tx, line_rx) = unbounded();
        let (entry_tx, entry_rx) = unbounded();
        let sink = Arc::new(CollectingSink::new());

        for line in [
            "2026-02-01T10:15:01Z INFO 200 /ping 10ms",
            "",
            "2026-02-01T10:15:01Z INFO /ping 10ms",
            "2026-02-01T10:15:02Z ERROR 500 /api 300ms",
        ] {
            line_tx.send(line.to_string()).unwrap();
        }
        drop(line_tx);

        let report = worker_thread(0, line_rx, entry_tx, sink.clone());

        assert_eq!(report.parsed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.blank, 1);

        let entries: Vec<LogEntry> = entry_rx.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].path, "/api");

        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].reason,
            ParseErrorKind::InsufficientFields { found: 4 }
        );
    }

    #[test]
    fn test_worker_exits_when_aggregator_is_gone() {
        let (line_tx, line_rx) = unbounded();
        let (entry_tx, entry_rx) = unbounded::<LogEntry>();
        drop(entry_rx);

        line_tx
            .send("2026-02-01T10:15:01Z INFO 200 /ping 10ms".to_string())
            .unwrap();
        line_tx
            .send("2026-02-01T10:15:01Z INFO 200 /ping 10ms".to_string())
            .unwrap();
        drop(line_tx);

        let report = worker_thread(3, line_rx, entry_tx, Arc::new(CollectingSink::new()));
        assert_eq!(report.parsed, 0);
    }
}
