use clap::ValueEnum;
use std::path::PathBuf;

use crate::error_log::ErrorLogConfig;
use crate::parallel::{ParallelConfig, DEFAULT_BUFFER_SIZE};

/// Main configuration struct for a log-analyzer run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub performance: PerformanceConfig,
    pub error_log: ErrorLogConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub paths: Vec<PathBuf>,
    pub file_order: FileOrder,
}

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Print the JSON report after the text summary
    pub json: bool,
    /// Write the CSV report to this file
    pub csv_path: Option<PathBuf>,
    /// Print processing statistics to stderr
    pub stats: bool,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    /// Parser worker count, 0 means one per logical CPU
    pub threads: usize,
    pub buffer_size: usize,
}

/// File processing order
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum FileOrder {
    /// Order given on the command line
    #[default]
    Cli,
    /// Sorted by path
    Name,
}

impl AnalyzerConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            input: InputConfig {
                paths: cli.files.clone(),
                file_order: cli.file_order.clone(),
            },
            output: OutputConfig {
                json: cli.json,
                csv_path: cli.csv.clone(),
                stats: cli.stats,
            },
            performance: PerformanceConfig {
                threads: cli.threads,
                buffer_size: cli.buffer_size,
            },
            error_log: ErrorLogConfig {
                path: if cli.no_error_log {
                    None
                } else {
                    Some(cli.error_log.clone())
                },
            },
        }
    }

    /// Get effective thread count with defaults
    pub fn effective_threads(&self) -> usize {
        if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        }
    }

    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig {
            num_workers: self.effective_threads(),
            buffer_size: self.performance.buffer_size,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                paths: Vec::new(),
                file_order: FileOrder::Cli,
            },
            output: OutputConfig::default(),
            performance: PerformanceConfig {
                threads: 0,
                buffer_size: DEFAULT_BUFFER_SIZE,
            },
            error_log: ErrorLogConfig::default(),
        }
    }
}
