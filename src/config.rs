//! Validated run configuration.

use crate::cli::Cli;
use crate::discovery::ExcludeSet;
use crate::error::{CombineError, Result};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Everything a single combine run needs, validated and normalized.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Absolute root of the scanned tree.
    pub root: PathBuf,
    /// Absolute path of the combined output file.
    pub output: PathBuf,
    /// File name suffix, always starting with `.`.
    pub extension: String,
    /// Exclusion patterns matched against root-relative paths.
    pub excludes: ExcludeSet,
    /// Canonical path of the running executable, never used as an input.
    pub self_path: Option<PathBuf>,
}

impl RunConfig {
    /// Build a configuration from explicit values.
    ///
    /// Fails if `root` is not an existing directory. Relative `output` paths
    /// resolve against the current directory, not against `root`.
    pub fn new<I, S>(
        root: impl AsRef<Path>,
        output: impl AsRef<Path>,
        extension: &str,
        excludes: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CombineError::DirectoryNotFound(root.to_path_buf()));
        }

        let config = Self {
            root: absolutize(root)?,
            output: absolutize(output.as_ref())?,
            extension: normalize_extension(extension),
            excludes: ExcludeSet::new(excludes),
            self_path: std::env::current_exe()
                .and_then(|exe| exe.canonicalize())
                .ok(),
        };

        debug!(
            root = %config.root.display(),
            output = %config.output.display(),
            extension = %config.extension,
            excludes = config.excludes.len(),
            "Run configuration resolved"
        );

        Ok(config)
    }

    /// Build a configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.root_directory {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(CombineError::CurrentDir)?,
        };
        Self::new(root, &cli.output_file, &cli.extension, &cli.exclude)
    }

    /// Override the executable path treated as "self".
    pub fn with_self_path(mut self, path: Option<PathBuf>) -> Self {
        self.self_path = path;
        self
    }

    /// Check whether `path` is the output file or the running executable.
    pub fn is_reserved_input(&self, path: &Path) -> bool {
        if path == self.output.as_path() {
            return true;
        }

        // Only canonicalize when the file name could match.
        match &self.self_path {
            Some(exe) if exe.file_name() == path.file_name() => path
                .canonicalize()
                .is_ok_and(|canonical| &canonical == exe),
            _ => false,
        }
    }
}

/// Prepend a dot to an extension that lacks one.
pub fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

/// Make `path` absolute and lexically resolve `.` and `..`, without
/// following symlinks.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(CombineError::CurrentDir)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
