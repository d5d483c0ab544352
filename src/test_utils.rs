#[cfg(test)]
pub mod fixtures {
    use crate::config::RunConfig;
    use std::fs;
    use std::path::Path;

    /// Create each `(relative path, content)` pair under `root`.
    pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
        for (relative, content) in files {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
        }
    }

    /// Build a run configuration for a test tree, with no executable to skip.
    pub fn config_for(
        root: &Path,
        output: impl AsRef<Path>,
        extension: &str,
        excludes: &[&str],
    ) -> RunConfig {
        RunConfig::new(root, output, extension, excludes.iter().copied())
            .unwrap()
            .with_self_path(None)
    }
}
