//! Loading per-directory configuration from storage.
//!
//! This is the only module that touches the filesystem. A lookup must keep
//! working with a missing, unreadable or malformed file, so the
//! [`ConfigFileLoader`] contract is infallible: every failure degrades to
//! [`ConfigFile::empty`] and is reported through `tracing`.

use crate::constants::CONFIG_FILE_NAME;
use crate::{ConfigFile, Error, Result, parse};
use cascade_fs::{NormalizedPath, io};
use std::sync::Arc;

/// Source of per-directory configuration.
pub trait ConfigFileLoader: Send + Sync {
    /// Load the configuration declared directly in `directory`.
    ///
    /// Must not fail: absent or broken files yield an empty configuration.
    fn load(&self, directory: &NormalizedPath) -> Arc<ConfigFile>;
}

impl<L: ConfigFileLoader + ?Sized> ConfigFileLoader for Arc<L> {
    fn load(&self, directory: &NormalizedPath) -> Arc<ConfigFile> {
        (**self).load(directory)
    }
}

/// Reads `<directory>/<file_name>` from disk.
#[derive(Debug, Clone)]
pub struct FsConfigLoader {
    file_name: String,
}

impl FsConfigLoader {
    /// Create a loader looking for the given file name in each directory.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Load a directory's configuration, reporting failures.
    ///
    /// Returns `Ok(None)` when the directory declares nothing.
    pub fn try_load(&self, directory: &NormalizedPath) -> Result<Option<ConfigFile>> {
        try_load_file(&directory.join(&self.file_name))
    }
}

impl Default for FsConfigLoader {
    fn default() -> Self {
        Self::new(CONFIG_FILE_NAME)
    }
}

impl ConfigFileLoader for FsConfigLoader {
    fn load(&self, directory: &NormalizedPath) -> Arc<ConfigFile> {
        load_config_file(&directory.join(&self.file_name))
    }
}

/// Load an explicit configuration file with the loader's degradation policy.
pub fn load_config_file(path: &NormalizedPath) -> Arc<ConfigFile> {
    match try_load_file(path) {
        Ok(Some(file)) => {
            tracing::debug!(path = %path, entries = file.len(), root = file.is_root(), "Loaded config");
            Arc::new(file)
        }
        Ok(None) => ConfigFile::empty(),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Ignoring unusable config file");
            ConfigFile::empty()
        }
    }
}

fn try_load_file(path: &NormalizedPath) -> Result<Option<ConfigFile>> {
    let Some(content) = io::read_text_if_exists(path)? else {
        return Ok(None);
    };
    parse(&content).map(Some).map_err(|source| Error::Parse {
        path: path.to_native(),
        source,
    })
}
