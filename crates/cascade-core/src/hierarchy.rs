//! Per-session resolution over the directory hierarchy.

use crate::{ConfigFile, ConfigFileLoader};
use cascade_fs::NormalizedPath;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Where a resolved value was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The configuration file of this directory
    Directory(NormalizedPath),
    /// The session default
    Default,
}

/// A value found for a key, with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

type DirectoryCell = Arc<OnceLock<Arc<ConfigFile>>>;

/// Resolves keys for files by cascading directory configurations.
///
/// Each directory is loaded at most once for the lifetime of the
/// hierarchy. Concurrent lookups that reach the same uncached directory
/// wait on a shared once-cell instead of loading it twice, while lookups
/// for other directories proceed independently.
pub struct ConfigurationHierarchy {
    root_default: Arc<ConfigFile>,
    loader: Arc<dyn ConfigFileLoader>,
    directories: DashMap<NormalizedPath, DirectoryCell>,
}

impl ConfigurationHierarchy {
    /// Create a hierarchy over `loader` with `root_default` as the final
    /// fallback.
    pub fn new(loader: Arc<dyn ConfigFileLoader>, root_default: Arc<ConfigFile>) -> Self {
        Self {
            root_default,
            loader,
            directories: DashMap::new(),
        }
    }

    /// Look up `key` for the file at `file_path`.
    ///
    /// Returns `None` when no directory up to the nearest root marker, nor
    /// the session default, declares the key. An empty path is never
    /// found.
    pub fn try_get_value(&self, file_path: impl AsRef<Path>, key: &str) -> Option<String> {
        self.resolve(file_path, key).map(|resolved| resolved.value)
    }

    /// Like [`try_get_value`](Self::try_get_value), also reporting where
    /// the value came from.
    pub fn resolve(&self, file_path: impl AsRef<Path>, key: &str) -> Option<Resolved> {
        let file_path = NormalizedPath::new(file_path);
        if file_path.is_empty() {
            return None;
        }

        let mut dir = file_path.parent();
        while let Some(current) = dir {
            let config = self.directory(&current);
            if let Some(value) = config.try_get(key) {
                return Some(Resolved {
                    value: value.to_string(),
                    source: Source::Directory(current),
                });
            }
            if config.is_root() {
                tracing::trace!(dir = %current, key, "Stopping at root config");
                break;
            }
            dir = current.parent();
        }

        self.root_default.try_get(key).map(|value| Resolved {
            value: value.to_string(),
            source: Source::Default,
        })
    }

    /// Every key visible to the file at `file_path` with its effective
    /// value, using the same precedence as [`resolve`](Self::resolve).
    pub fn effective_config(&self, file_path: impl AsRef<Path>) -> BTreeMap<String, String> {
        let mut effective = BTreeMap::new();
        let file_path = NormalizedPath::new(file_path);
        if file_path.is_empty() {
            return effective;
        }

        let mut dir = file_path.parent();
        while let Some(current) = dir {
            let config = self.directory(&current);
            for (key, value) in config.iter() {
                effective
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
            }
            if config.is_root() {
                break;
            }
            dir = current.parent();
        }

        for (key, value) in self.root_default.iter() {
            effective
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        effective
    }

    /// The session-wide fallback configuration.
    pub fn root_default(&self) -> &Arc<ConfigFile> {
        &self.root_default
    }

    /// Number of directories consulted so far.
    pub fn cached_directories(&self) -> usize {
        self.directories.len()
    }

    fn directory(&self, dir: &NormalizedPath) -> Arc<ConfigFile> {
        if let Some(config) = self.directories.get(dir).and_then(|cell| cell.get().cloned()) {
            tracing::trace!(dir = %dir, "Config cache hit");
            return config;
        }

        // Hold the shard lock only long enough to obtain the cell.
        let cell = Arc::clone(&*self.directories.entry(dir.clone()).or_default());
        Arc::clone(cell.get_or_init(|| {
            tracing::debug!(dir = %dir, "Loading directory config");
            self.loader.load(dir)
        }))
    }
}

impl std::fmt::Debug for ConfigurationHierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationHierarchy")
            .field("root_default", &self.root_default)
            .field("cached_directories", &self.directories.len())
            .finish()
    }
}
