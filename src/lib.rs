pub mod cli;
pub mod combiner;
pub mod config;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod logging;

#[cfg(test)]
pub mod test_utils;

pub use cli::Cli;
pub use combiner::{CombineSummary, FileEntry, RunOutcome, collect_files, run};
pub use config::RunConfig;
pub use discovery::{DirectoryWalker, ExcludeSet, WalkConfig};
pub use error::{CombineError, IoOperation, Result};
