//! Input collection: turns the command-line paths into one list of raw lines.
//!
//! The whole input is loaded before the pipeline starts, so any I/O failure
//! surfaces here as a run-level error and no partial summary is produced.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::FileOrder;
use crate::decompression::{maybe_decompress, open_log_file};

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Raw lines of every input, in file order
#[derive(Debug, Default, Clone)]
pub struct InputLines {
    pub lines: Vec<String>,
    pub files_read: usize,
}

/// Expand directories, apply the ordering, then read every input fully
pub fn read_input_lines(paths: &[PathBuf], order: &FileOrder) -> Result<InputLines> {
    let files = expand_paths(paths, order)?;
    let mut input = InputLines::default();

    for path in &files {
        let content = read_source(path)?;
        input.lines.extend(split_lines(&content));
        input.files_read += 1;
    }

    tracing::debug!(
        files = input.files_read,
        lines = input.lines.len(),
        "input loaded"
    );
    Ok(input)
}

/// Replace every directory by the regular files directly inside it, sorted by name
pub fn expand_paths(paths: &[PathBuf], order: &FileOrder) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if is_stdin(path) {
            files.push(path.clone());
            continue;
        }

        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access input '{}'", path.display()))?;

        if metadata.is_dir() {
            let mut entries = Vec::new();
            for entry in fs::read_dir(path)
                .with_context(|| format!("Failed to read directory '{}'", path.display()))?
            {
                let entry = entry
                    .with_context(|| format!("Failed to read directory '{}'", path.display()))?;
                let entry_path = entry.path();
                if entry_path.is_file() {
                    entries.push(entry_path);
                }
            }
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }

    if let FileOrder::Name = order {
        files.sort();
    }

    Ok(files)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

fn read_source(path: &Path) -> Result<String> {
    let mut bytes = Vec::new();

    if is_stdin(path) {
        let (_, mut reader) =
            maybe_decompress(io::stdin()).context("Failed to read from stdin")?;
        reader
            .read_to_end(&mut bytes)
            .context("Failed to read from stdin")?;
    } else {
        let mut reader = open_log_file(path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        reader
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read log file '{}'", path.display()))?;
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split on `\n` only; a trailing newline leaves one empty last line
fn split_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content.split('\n').map(str::to_string)
}
