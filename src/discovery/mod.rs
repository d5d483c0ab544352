//! Discovery layer for input file enumeration.
//!
//! This module handles:
//! - Directory traversal with `venv` pruning
//! - File name suffix filtering
//! - User-supplied glob exclusions

pub mod exclude;
pub mod walker;

pub use exclude::ExcludeSet;
pub use walker::{DirectoryWalker, RESERVED_DIR, WalkConfig};
