use anyhow::Result;
use clap::Parser;
use crossbeam_channel::unbounded;
use std::sync::Arc;

use log_analyzer::cli::Cli;
use log_analyzer::config::AnalyzerConfig;
use log_analyzer::error_log::{init_error_log, ErrorSink, NullSink, TracingErrorSink};
use log_analyzer::platform::{ExitCode, SafeFileOut, SafeStdout, SignalHandler};
use log_analyzer::{run_analysis, Stats};

fn main() {
    let cli = Cli::parse();
    let config = AnalyzerConfig::from_cli(&cli);

    let exit_code = match run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("log-analyzer: error: {:#}", e);
            ExitCode::GeneralError
        }
    };

    exit_code.exit();
}

/// Everything that must be dropped before `process::exit` lives in here
fn run(config: &AnalyzerConfig) -> Result<ExitCode> {
    // Keeps the error log writer flushing until the run is over
    let log_guard = match init_error_log(&config.error_log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("log-analyzer: warning: {:#}; parse failures will not be logged", e);
            None
        }
    };
    let error_sink: Arc<dyn ErrorSink> = if log_guard.is_some() {
        Arc::new(TracingErrorSink)
    } else {
        Arc::new(NullSink)
    };

    let (ctrl_tx, ctrl_rx) = unbounded();
    let _signal_handler = SignalHandler::new(ctrl_tx)?;

    let result = run_analysis(config, error_sink, ctrl_rx)?;

    let mut stdout = SafeStdout::new();
    stdout.print(&result.stats.summary_text())?;

    let exported = export_reports(&result.stats, config, &mut stdout);
    stdout.flush()?;

    if config.output.stats {
        eprintln!("{}", result.processing.format_stats());
    }

    if result.interrupted {
        eprintln!("log-analyzer: interrupted, summary covers the lines read before shutdown");
        return Ok(ExitCode::SignalInt);
    }

    Ok(if exported {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    })
}

/// Write the optional JSON and CSV reports; each failure is reported on its own
fn export_reports(stats: &Stats, config: &AnalyzerConfig, stdout: &mut SafeStdout) -> bool {
    let mut ok = true;

    if config.output.json {
        let written = stats
            .to_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| stdout.writeln(&json));
        if let Err(e) = written {
            eprintln!("log-analyzer: JSON export failed: {:#}", e);
            ok = false;
        }
    }

    if let Some(csv_path) = &config.output.csv_path {
        let written = SafeFileOut::new(csv_path)
            .and_then(|file| stats.write_csv(file).map_err(anyhow::Error::from));
        if let Err(e) = written {
            eprintln!("log-analyzer: CSV export failed: {:#}", e);
            ok = false;
        }
    }

    ok
}
