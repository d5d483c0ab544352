//! Directory walking for candidate file discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory name whose whole subtree is never scanned.
pub const RESERVED_DIR: &str = "venv";

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Suffix a file name must end with (e.g. ".py").
    pub extension: String,
}

impl WalkConfig {
    /// Create a new WalkConfig matching the given file name suffix.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

/// Recursive walker that prunes `venv` directories and filters by suffix.
pub struct DirectoryWalker {
    config: WalkConfig,
}

impl DirectoryWalker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Check if a file name ends with the configured suffix.
    fn matches_extension(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            name.as_encoded_bytes().ends_with(self.config.extension.as_bytes())
        })
    }

    /// Check if any component of `path` is exactly `venv`.
    fn has_reserved_component(path: &Path) -> bool {
        path.components().any(|c| c.as_os_str() == OsStr::new(RESERVED_DIR))
    }

    fn is_reserved_dir(entry: &DirEntry) -> bool {
        entry.file_type().is_dir() && entry.file_name() == OsStr::new(RESERVED_DIR)
    }

    /// Anything that is not a directory: regular files, and symlinks unless
    /// they resolve to a directory. Dangling links are kept so reading them
    /// fails loudly later.
    fn is_file(entry: &DirEntry) -> bool {
        if entry.path_is_symlink() {
            return !entry.path().is_dir();
        }
        entry.file_type().is_file()
    }

    /// Walk `root` and return every file whose name ends with the suffix.
    ///
    /// A root that itself lies inside a `venv` directory yields nothing.
    /// Unreadable directories are logged and skipped.
    pub fn walk(&self, root: &Path) -> Vec<PathBuf> {
        if Self::has_reserved_component(root) {
            debug!(root = %root.display(), "Root lies inside a venv directory");
            return Vec::new();
        }

        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !Self::is_reserved_dir(e))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable entry");
                    None
                }
            })
            .filter(Self::is_file)
            .filter(|e| self.matches_extension(e.path()))
            .inspect(|e| trace!(path = %e.path().display(), "Candidate file"))
            .map(DirEntry::into_path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("main.py"), "print('main')").unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();

        let pkg = dir.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("util.py"), "def util(): pass").unwrap();

        let venv = dir.path().join("venv").join("lib");
        fs::create_dir_all(&venv).unwrap();
        fs::write(venv.join("site.py"), "# vendored").unwrap();

        dir
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        let mut names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_filters_by_suffix() {
        let dir = create_test_dir();
        let walker = DirectoryWalker::new(WalkConfig::new(".py"));

        let files = walker.walk(dir.path());

        assert_eq!(names(&files, dir.path()), vec!["main.py", "pkg/util.py"]);
    }

    #[test]
    fn test_walk_skips_nested_venv() {
        let dir = create_test_dir();
        let nested = dir.path().join("pkg").join("venv");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("hidden.py"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        let files = walker.walk(dir.path());

        assert!(files.iter().all(|f| !f.ends_with("hidden.py")));
        assert!(files.iter().all(|f| !f.ends_with("site.py")));
    }

    #[test]
    fn test_walk_keeps_similar_dir_names() {
        let dir = TempDir::new().unwrap();
        for name in ["venvx", "my_venv", ".venv"] {
            let sub = dir.path().join(name);
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join("keep.py"), "").unwrap();
        }

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        let files = walker.walk(dir.path());

        assert_eq!(
            names(&files, dir.path()),
            vec![".venv/keep.py", "my_venv/keep.py", "venvx/keep.py"]
        );
    }

    #[test]
    fn test_walk_keeps_file_named_venv() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("venv"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new("venv"));
        let files = walker.walk(dir.path());

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_walk_root_named_venv_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("venv");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.py"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        assert!(walker.walk(&root).is_empty());
    }

    #[test]
    fn test_walk_root_inside_venv_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("venv").join("proj");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.py"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        assert!(walker.walk(&root).is_empty());
    }

    #[test]
    fn test_walk_root_under_venvx_is_scanned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("venvx").join("proj");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.py"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        assert_eq!(walker.walk(&root).len(), 1);
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("upper.PY"), "").unwrap();
        fs::write(dir.path().join("lower.py"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        let files = walker.walk(dir.path());

        assert_eq!(names(&files, dir.path()), vec!["lower.py"]);
    }

    #[test]
    fn test_suffix_is_not_limited_to_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("archive.tar.gz"), "").unwrap();
        fs::write(dir.path().join("plain.gz"), "").unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".tar.gz"));
        let files = walker.walk(dir.path());

        assert_eq!(names(&files, dir.path()), vec!["archive.tar.gz"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_includes_file_symlinks_but_not_dir_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = create_test_dir();
        symlink(dir.path().join("main.py"), dir.path().join("alias.py")).unwrap();
        symlink(dir.path().join("pkg"), dir.path().join("pkg_link.py")).unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        let files = walker.walk(dir.path());

        assert_eq!(
            names(&files, dir.path()),
            vec!["alias.py", "main.py", "pkg/util.py"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_keeps_dangling_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.py"), "").unwrap();
        symlink(dir.path().join("missing.py"), dir.path().join("dangling.py")).unwrap();

        let walker = DirectoryWalker::new(WalkConfig::new(".py"));
        let files = walker.walk(dir.path());

        assert_eq!(names(&files, dir.path()), vec!["dangling.py", "real.py"]);
    }
}
