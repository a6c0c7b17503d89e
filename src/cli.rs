// Command-line interface definitions

use clap::Parser;
use std::path::PathBuf;

use crate::config::FileOrder;
use crate::error_log::DEFAULT_ERROR_LOG;
use crate::parallel::DEFAULT_BUFFER_SIZE;

/// Environment variable overriding the parser worker count
pub const THREADS_ENV: &str = "LOG_ANALYZER_THREADS";

#[derive(Parser, Debug)]
#[command(name = "log-analyzer")]
#[command(about = "Summarize access logs: line counts, errors by status and path, latency")]
#[command(
    long_about = "Summarize access logs: line counts, errors by status and path, latency\n\nEach line must look like:\n  <RFC3339-timestamp> <LEVEL> <status> <path> <latency>ms\n\nLines that do not match are skipped and recorded in the error log.\n\nEXAMPLES:\n  log-analyzer access.log\n  log-analyzer --json logs/\n  log-analyzer --csv report.csv access.log.gz"
)]
#[command(version)]
pub struct Cli {
    /// Input files or directories (use "-" for stdin); gzip and zstd files are decompressed
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// File processing order
    #[arg(
        long = "file-order",
        value_enum,
        default_value = "cli",
        help_heading = "Input Options"
    )]
    pub file_order: FileOrder,

    /// Print the JSON report to stdout after the text summary
    #[arg(long = "json", help_heading = "Output Options")]
    pub json: bool,

    /// Write the CSV report to FILE
    #[arg(long = "csv", value_name = "FILE", help_heading = "Output Options")]
    pub csv: Option<PathBuf>,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// Append parse failures to FILE
    #[arg(
        long = "error-log",
        value_name = "FILE",
        default_value = DEFAULT_ERROR_LOG,
        help_heading = "Diagnostics"
    )]
    pub error_log: PathBuf,

    /// Do not write an error log
    #[arg(long = "no-error-log", help_heading = "Diagnostics")]
    pub no_error_log: bool,

    /// Number of parser threads (0 = one per logical CPU)
    #[arg(
        long = "threads",
        env = THREADS_ENV,
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Capacity of the line and entry queues
    #[arg(
        long = "buffer-size",
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help_heading = "Performance Options"
    )]
    pub buffer_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["log-analyzer"]).is_err());
    }

    #[test]
    fn test_buffer_size_must_be_positive() {
        assert!(Cli::try_parse_from(["log-analyzer", "--buffer-size", "0", "a.log"]).is_err());
        let cli = Cli::try_parse_from(["log-analyzer", "--buffer-size", "5", "a.log"]).unwrap();
        assert_eq!(cli.buffer_size, 5);
    }

    #[test]
    fn test_threads_from_environment() {
        std::env::set_var(THREADS_ENV, "3");
        let from_env = Cli::try_parse_from(["log-analyzer", "a.log"]);
        let from_flag = Cli::try_parse_from(["log-analyzer", "--threads", "5", "a.log"]);
        std::env::remove_var(THREADS_ENV);

        assert_eq!(from_env.unwrap().threads, 3);
        assert_eq!(from_flag.unwrap().threads, 5);
    }

    #[test]
    fn test_stdin_dash_is_accepted() {
        let cli = Cli::try_parse_from(["log-analyzer", "-"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("-")]);
    }
}
