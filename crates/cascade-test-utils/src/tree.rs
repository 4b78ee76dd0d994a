//! [`ConfigTree`] builder for on-disk resolution scenarios.

use cascade_core::constants::CONFIG_FILE_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with configuration files placed in chosen
/// subdirectories.
///
/// # Example
///
/// ```rust,no_run
/// use cascade_test_utils::ConfigTree;
///
/// let tree = ConfigTree::new()
///     .with_config("repo", "root = true")
///     .with_config("repo/src", "style = 4");
/// let file = tree.file("repo/src/app/main.x");
/// ```
pub struct ConfigTree {
    temp_dir: TempDir,
    file_name: String,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty tree using the default configuration file name.
    pub fn new() -> Self {
        Self::with_file_name(CONFIG_FILE_NAME)
    }

    /// Create an empty tree whose configuration files use `file_name`.
    pub fn with_file_name(file_name: &str) -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            file_name: file_name.to_string(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree. Nothing is created.
    pub fn path(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root().to_path_buf()
        } else {
            self.root().join(relative)
        }
    }

    /// Write a configuration file with `content` into directory `dir`
    /// (relative to the root, `""` for the root itself).
    pub fn with_config(self, dir: &str, content: &str) -> Self {
        self.write_config(dir, content);
        self
    }

    /// Write or overwrite a configuration file in place.
    pub fn write_config(&self, dir: &str, content: &str) {
        let dir_path = self.path(dir);
        fs::create_dir_all(&dir_path).unwrap();
        fs::write(dir_path.join(&self.file_name), content).unwrap();
    }

    /// Create `relative` as an (empty) source file, including its parent
    /// directories, and return its absolute path.
    pub fn file(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    /// Path of the configuration file for directory `dir`.
    pub fn config_path(&self, dir: &str) -> PathBuf {
        self.path(dir).join(&self.file_name)
    }
}
