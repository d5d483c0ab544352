use clap::Parser;
use std::path::PathBuf;

/// Default output file name when none is given.
pub const DEFAULT_OUTPUT: &str = "Combined.py";

/// Default extension when none is given.
pub const DEFAULT_EXTENSION: &str = ".py";

#[derive(Parser, Debug)]
#[command(
    name = "combine-files",
    version,
    about = "Recursively combine files of a specified extension into a single output file.",
    long_about = "combine-files walks a directory tree, collects every file ending in the given \
extension (skipping any directory named `venv`), and appends them in sorted order to one \
output file, each preceded by a `# File: <relative path>` header."
)]
pub struct Cli {
    /// Root directory to search (default: current working directory)
    #[arg(value_name = "ROOT_DIRECTORY")]
    pub root_directory: Option<PathBuf>,

    /// Name/path of the output file
    #[arg(value_name = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT)]
    pub output_file: PathBuf,

    /// File extension to include (a leading dot is added if missing)
    #[arg(value_name = "EXTENSION", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Glob pattern to exclude, matched against paths relative to the root
    /// (repeatable, e.g. '*_test.py', 'tests/*')
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
