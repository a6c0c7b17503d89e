//! Access-log line parser
//!
//! Lines have the fixed shape
//! `<RFC3339-timestamp> <LEVEL> <status> <path> <latency>ms`, separated by
//! arbitrary whitespace. Anything after the fifth field is ignored.

use chrono::{DateTime, FixedOffset};
use std::num::ParseIntError;
use thiserror::Error;

/// Number of whitespace-delimited fields a line must carry
pub const REQUIRED_FIELDS: usize = 5;

const LATENCY_SUFFIX: &str = "ms";

/// One successfully parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub level: String,
    pub status: i64,
    pub path: String,
    pub latency_ms: u64,
}

/// Why a line could not be turned into a [`LogEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("malformed line: expected at least {} fields, found {found}", REQUIRED_FIELDS)]
    InsufficientFields { found: usize },

    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        value: String,
        reason: chrono::ParseError,
    },

    #[error("invalid status '{value}': {reason}")]
    InvalidStatus { value: String, reason: ParseIntError },

    #[error("invalid latency '{value}': expected <integer>ms")]
    InvalidLatency { value: String },
}

/// A rejected line together with the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ParseFailure {
    pub line: String,
    pub reason: ParseErrorKind,
}

impl ParseFailure {
    fn new(line: &str, reason: ParseErrorKind) -> Self {
        Self {
            line: line.to_string(),
            reason,
        }
    }
}

/// Parse a single raw line
pub fn parse_line(line: &str) -> Result<LogEntry, ParseFailure> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(ParseFailure::new(
            line,
            ParseErrorKind::InsufficientFields {
                found: fields.len(),
            },
        ));
    }

    let timestamp = DateTime::parse_from_rfc3339(fields[0]).map_err(|reason| {
        ParseFailure::new(
            line,
            ParseErrorKind::InvalidTimestamp {
                value: fields[0].to_string(),
                reason,
            },
        )
    })?;

    let status = fields[2].parse::<i64>().map_err(|reason| {
        ParseFailure::new(
            line,
            ParseErrorKind::InvalidStatus {
                value: fields[2].to_string(),
                reason,
            },
        )
    })?;

    let latency_ms = parse_latency(fields[4]).ok_or_else(|| {
        ParseFailure::new(
            line,
            ParseErrorKind::InvalidLatency {
                value: fields[4].to_string(),
            },
        )
    })?;

    Ok(LogEntry {
        timestamp,
        level: fields[1].to_string(),
        status,
        path: fields[3].to_string(),
        latency_ms,
    })
}

fn parse_latency(field: &str) -> Option<u64> {
    field
        .strip_suffix(LATENCY_SUFFIX)
        .and_then(|digits| digits.parse::<u64>().ok())
}

/// True for lines with no content at all, e.g. the tail after a final newline
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
