//! Dispatcher thread: the only producer of the line queue

use crossbeam_channel::{Receiver, Sender};

use crate::platform::Ctrl;

use super::types::DispatchReport;

/// Push every raw line into the line queue, then close it by dropping the sender.
///
/// A `Ctrl::Shutdown` closes the queue early; lines already queued are still
/// parsed and aggregated by the downstream stages.
pub(crate) fn dispatcher_thread<I>(
    lines: I,
    line_sender: Sender<String>,
    ctrl_rx: Receiver<Ctrl>,
) -> DispatchReport
where
    I: IntoIterator<Item = String>,
{
    let mut report = DispatchReport::default();

    for line in lines {
        if let Ok(Ctrl::Shutdown) = ctrl_rx.try_recv() {
            tracing::debug!(
                lines_sent = report.lines_sent,
                "shutdown requested, closing line queue"
            );
            report.interrupted = true;
            break;
        }

        // Blocks while the queue is full
        if line_sender.send(line).is_err() {
            // Every worker is gone
            break;
        }
        report.lines_sent += 1;
    }

    report
}
