mod common;
use common::*;

use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_gzip_input_matches_plain() {
    let temp_dir = TempDir::new().unwrap();
    let gz_path = temp_dir.path().join("access.log.gz");
    fs::write(&gz_path, gzip(&sample_log())).unwrap();

    let (plain, _stderr, _code) = run_analyzer_with_file(&["--no-error-log"], &sample_log());
    let (stdout, stderr, exit_code) =
        run_analyzer_with_files(&["--no-error-log"], &[gz_path.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, plain);
}

#[test]
fn test_zstd_input_matches_plain() {
    let temp_dir = TempDir::new().unwrap();
    let zst_path = temp_dir.path().join("access.log.zst");
    fs::write(&zst_path, zstd::encode_all(sample_log().as_bytes(), 0).unwrap()).unwrap();

    let (plain, _stderr, _code) = run_analyzer_with_file(&["--no-error-log"], &sample_log());
    let (stdout, stderr, exit_code) =
        run_analyzer_with_files(&["--no-error-log"], &[zst_path.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, plain);
}

#[test]
fn test_gzip_on_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stdin.gz");
    fs::write(&path, gzip(&sample_log())).unwrap();
    let file = fs::File::open(&path).unwrap();

    let output = std::process::Command::new(BINARY)
        .args(["--no-error-log", "-"])
        .stdin(file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Total lines processed: 3\n"));
}

#[test]
fn test_zip_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("logs.zip");
    fs::write(&zip_path, b"PK\x03\x04").unwrap();

    let (stdout, stderr, exit_code) =
        run_analyzer_with_files(&["--no-error-log"], &[zip_path.to_str().unwrap()]);
    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("ZIP archives are not supported"));
}
