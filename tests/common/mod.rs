// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

pub const BINARY: &str = env!("CARGO_BIN_EXE_log-analyzer");

/// Helper function to run log-analyzer with given arguments and input via stdin
pub fn run_analyzer_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    let mut cmd = Command::new(BINARY)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start log-analyzer");

    if let Some(mut stdin) = cmd.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run log-analyzer with a temporary file
pub fn run_analyzer_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(file_content.as_bytes())
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");

    let path = temp_file.path().to_str().unwrap().to_string();
    run_analyzer_with_files(args, &[&path])
}

/// Helper function to run log-analyzer with multiple files
pub fn run_analyzer_with_files(args: &[&str], files: &[&str]) -> (String, String, i32) {
    let mut full_args = args.to_vec();
    full_args.extend(files);

    let output = Command::new(BINARY)
        .args(&full_args)
        .env_remove("LOG_ANALYZER_THREADS")
        .env_remove("LOG_ANALYZER_LOG")
        .output()
        .expect("Failed to execute log-analyzer");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run log-analyzer on a temporary file with extra environment variables
pub fn run_analyzer_with_env(
    args: &[&str],
    file_content: &str,
    env: &[(&str, &str)],
) -> (String, String, i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(file_content.as_bytes())
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");

    let output = Command::new(BINARY)
        .args(args)
        .arg(temp_file.path())
        .env_remove("LOG_ANALYZER_LOG")
        .envs(env.iter().copied())
        .output()
        .expect("Failed to execute log-analyzer");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Three-line sample: one INFO and two ERROR lines for 500 /api
pub fn sample_log() -> String {
    [
        "2026-02-01T10:15:01Z INFO 200 /ping 10ms",
        "2026-02-01T10:15:02Z ERROR 500 /api 300ms",
        "2026-02-01T10:15:03Z ERROR 500 /api 100ms",
    ]
    .join("\n")
        + "\n"
}

/// Extract the JSON document that follows the text summary
pub fn extract_json(stdout: &str) -> serde_json::Value {
    let start = stdout.find('{').expect("stdout should contain a JSON document");
    serde_json::from_str(&stdout[start..]).expect("JSON report should parse")
}
