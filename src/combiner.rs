//! The combine pipeline: collect, sort, and append files to one output.

use crate::config::RunConfig;
use crate::discovery::{DirectoryWalker, WalkConfig};
use crate::error::{CombineError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Line terminator written after every header and every file body.
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Prefix of the per-file header line.
pub const HEADER_PREFIX: &str = "# File: ";

/// A single input file, located both absolutely and relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub absolute: PathBuf,
    pub relative: PathBuf,
}

impl FileEntry {
    pub fn new(absolute: PathBuf, root: &Path) -> Self {
        let relative = absolute
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| absolute.clone());
        Self { absolute, relative }
    }

    /// The header line for this file, including its line ending.
    ///
    /// Fails if the relative path cannot be written as UTF-8.
    pub fn header(&self) -> Result<Vec<u8>> {
        let relative = self
            .relative
            .to_str()
            .ok_or_else(|| CombineError::NonUtf8Path(self.absolute.clone()))?;

        let mut header = format!("{HEADER_PREFIX}{relative}").into_bytes();
        header.extend_from_slice(LINE_ENDING);
        Ok(header)
    }
}

/// Outcome of a completed write phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub files_combined: usize,
    pub bytes_written: u64,
    pub output: PathBuf,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing matched; the output file was left untouched.
    NoFiles,
    Combined(CombineSummary),
}

/// Collect the input files for `config`, sorted by absolute path.
///
/// Applies, in order: `venv` pruning and suffix filtering during the walk,
/// removal of the output file and the running executable, then the user's
/// exclusion patterns.
pub fn collect_files(config: &RunConfig) -> Vec<FileEntry> {
    let walker = DirectoryWalker::new(WalkConfig::new(config.extension.as_str()));

    let mut files: Vec<FileEntry> = walker
        .walk(&config.root)
        .into_iter()
        .filter(|path| {
            let reserved = config.is_reserved_input(path);
            if reserved {
                debug!(path = %path.display(), "Skipping output file or executable");
            }
            !reserved
        })
        .map(|path| FileEntry::new(path, &config.root))
        .filter(|entry| {
            let excluded = config.excludes.is_excluded(&entry.relative);
            if excluded {
                debug!(path = %entry.relative.display(), "Excluded by pattern");
            }
            !excluded
        })
        .collect();

    files.sort_by(|a, b| a.absolute.as_os_str().cmp(b.absolute.as_os_str()));

    info!(count = files.len(), root = %config.root.display(), "Collected input files");
    files
}

/// Remove a pre-existing output file so the run starts from an empty file.
pub fn prepare_output(output: &Path) -> Result<()> {
    if fs::symlink_metadata(output).is_err() {
        return Ok(());
    }

    debug!(path = %output.display(), "Removing existing output file");
    fs::remove_file(output).map_err(|source| CombineError::Cleanup {
        path: output.to_path_buf(),
        source,
    })
}

/// Append one file block (header, raw bytes, line ending) to `output`.
///
/// Returns the number of bytes appended.
pub fn append_file(entry: &FileEntry, output: &Path) -> Result<u64> {
    let header = entry.header()?;
    let content = fs::read(&entry.absolute)
        .map_err(|e| CombineError::read_error(&entry.absolute, e))?;

    let mut out = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|e| CombineError::write_error(output, e))?;

    out.write_all(&header)
        .and_then(|()| out.write_all(&content))
        .and_then(|()| out.write_all(LINE_ENDING))
        .map_err(|e| CombineError::write_error(output, e))?;

    Ok((header.len() + content.len() + LINE_ENDING.len()) as u64)
}

/// Write every entry to `output` in order, stopping at the first failure.
///
/// Blocks written before a failure stay in the output file.
pub fn write_files(files: &[FileEntry], output: &Path) -> Result<CombineSummary> {
    let mut bytes_written = 0;
    for entry in files {
        bytes_written += append_file(entry, output)?;
        debug!(path = %entry.relative.display(), "Appended file");
    }

    Ok(CombineSummary {
        files_combined: files.len(),
        bytes_written,
        output: output.to_path_buf(),
    })
}

/// Run the whole pipeline for `config`.
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let files = collect_files(config);
    if files.is_empty() {
        return Ok(RunOutcome::NoFiles);
    }

    prepare_output(&config.output)?;
    let summary = write_files(&files, &config.output)?;

    info!(
        files = summary.files_combined,
        bytes = summary.bytes_written,
        output = %summary.output.display(),
        "Combine completed"
    );
    Ok(RunOutcome::Combined(summary))
}
