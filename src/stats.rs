use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::parser::LogEntry;

/// Level whose entries are counted in the error table
pub const ERROR_LEVEL: &str = "ERROR";

/// Milliseconds represented by one mark in the latency chart
pub const CHART_SCALE_MS: u64 = 10;

/// Widest bar the chart draws; longer bars end in [`CHART_OVERFLOW_MARK`]
pub const CHART_MAX_WIDTH: usize = 1000;

const CHART_MARK: &str = "=";
const CHART_OVERFLOW_MARK: &str = "+";

/// Composite key of the error table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorKey {
    pub status: i64,
    pub path: String,
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.path)
    }
}

/// Running summary of every ingested entry.
///
/// Only the aggregator thread mutates a `Stats`; everyone else sees it after
/// the pipeline has been joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    total_lines: u64,
    error_counts: BTreeMap<ErrorKey, u64>,
    latency_sum: u128,
    latency_max: u64,
}

/// Serializable view of [`Stats`] used by the JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total_lines: u64,
    pub errors: BTreeMap<String, u64>,
    pub latency: LatencyReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencyReport {
    pub avg: u64,
    pub max: u64,
}

/// Failures while serializing or writing an optional report
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one entry into the running totals
    pub fn ingest(&mut self, entry: &LogEntry) {
        self.total_lines += 1;

        if entry.level == ERROR_LEVEL {
            let key = ErrorKey {
                status: entry.status,
                path: entry.path.clone(),
            };
            *self.error_counts.entry(key).or_insert(0) += 1;
        }

        self.latency_sum += u128::from(entry.latency_ms);
        self.latency_max = self.latency_max.max(entry.latency_ms);
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn error_counts(&self) -> &BTreeMap<ErrorKey, u64> {
        &self.error_counts
    }

    /// Kept wider than a single latency so the sum of many `u64` values cannot wrap
    pub fn latency_sum(&self) -> u128 {
        self.latency_sum
    }

    pub fn latency_max(&self) -> u64 {
        self.latency_max
    }

    /// Truncating mean latency; 0 when nothing was ingested
    pub fn average_latency(&self) -> u64 {
        if self.total_lines == 0 {
            0
        } else {
            // Never above latency_max, so it always fits back into u64
            let avg = self.latency_sum / u128::from(self.total_lines);
            u64::try_from(avg).unwrap_or(u64::MAX)
        }
    }

    /// Human-readable report printed after every run
    pub fn summary_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Total lines processed: {}\n", self.total_lines));

        if !self.error_counts.is_empty() {
            output.push_str("\nErrors:\n");
            for (key, count) in &self.error_counts {
                output.push_str(&format!("{} -> {}\n", key, count));
            }
        }

        if self.total_lines > 0 {
            let avg = self.average_latency();
            output.push_str(&format!(
                "\nLatency:\navg: {}ms\nmax: {}ms\n",
                avg, self.latency_max
            ));

            output.push_str(&format!(
                "\nLatency graph (each '{}' is {} ms):\n",
                CHART_MARK, CHART_SCALE_MS
            ));
            output.push_str(&format!("avg [{}]\n", chart_bar(avg)));
            output.push_str(&format!("max [{}]\n", chart_bar(self.latency_max)));
        }

        output
    }

    pub fn report(&self) -> StatsReport {
        let (avg, max) = if self.total_lines > 0 {
            (self.average_latency(), self.latency_max)
        } else {
            (0, 0)
        };

        StatsReport {
            total_lines: self.total_lines,
            errors: self
                .error_counts
                .iter()
                .map(|(key, count)| (key.to_string(), *count))
                .collect(),
            latency: LatencyReport { avg, max },
        }
    }

    /// Pretty-printed JSON document with two-space indentation
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }

    /// Write the `metric,value` CSV report
    pub fn write_csv<W: Write>(&self, output: W) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(output);

        writer.write_record(["metric", "value"])?;
        writer.write_record(["total_lines".to_string(), self.total_lines.to_string()])?;

        for (key, count) in &self.error_counts {
            writer.write_record(["error".to_string(), format!("{}:{}", key, count)])?;
        }

        if self.total_lines > 0 {
            writer.write_record(["latency_avg".to_string(), self.average_latency().to_string()])?;
            writer.write_record(["latency_max".to_string(), self.latency_max.to_string()])?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn chart_bar(value_ms: u64) -> String {
    let marks = usize::try_from(value_ms / CHART_SCALE_MS).unwrap_or(usize::MAX);
    if marks > CHART_MAX_WIDTH {
        format!("{}{}", CHART_MARK.repeat(CHART_MAX_WIDTH), CHART_OVERFLOW_MARK)
    } else {
        CHART_MARK.repeat(marks)
    }
}

/// Statistics about the run itself, shown with `--stats`
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_parsed: usize,
    pub lines_failed: usize,
    pub lines_blank: usize,
    pub files_processed: usize,
    pub workers: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} parsed, {} failed",
            self.lines_read, self.lines_parsed, self.lines_failed
        );

        if self.lines_blank > 0 {
            output.push_str(&format!(", {} blank", self.lines_blank));
        }

        if self.files_processed > 0 {
            output.push_str(&format!(", {} files", self.files_processed));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output.push_str(&format!(", {} workers", self.workers));
        output
    }
}
