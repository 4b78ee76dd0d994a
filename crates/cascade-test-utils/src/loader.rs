//! [`CountingLoader`], an in-memory [`ConfigFileLoader`] double.

use cascade_core::{ConfigFile, ConfigFileLoader};
use cascade_fs::NormalizedPath;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves configurations from memory and counts loads per directory.
///
/// Directories without a registered configuration load as empty, like a
/// directory without a file on disk.
#[derive(Default)]
pub struct CountingLoader {
    files: HashMap<NormalizedPath, ConfigFile>,
    loads: Mutex<HashMap<NormalizedPath, usize>>,
    total: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `dir` as declaring the given entries.
    pub fn with_dir(mut self, dir: &str, entries: &[(&str, &str)]) -> Self {
        self.files.insert(
            NormalizedPath::new(dir),
            ConfigFile::from_entries(entries.iter().copied()),
        );
        self
    }

    /// Sleep inside every load, widening the window for racing lookups.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `dir` has been loaded.
    pub fn loads_of(&self, dir: &str) -> usize {
        self.loads
            .lock()
            .unwrap()
            .get(&NormalizedPath::new(dir))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of loads across all directories.
    pub fn total_loads(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl ConfigFileLoader for CountingLoader {
    fn load(&self, directory: &NormalizedPath) -> Arc<ConfigFile> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .loads
            .lock()
            .unwrap()
            .entry(directory.clone())
            .or_default() += 1;

        match self.files.get(directory) {
            Some(file) => Arc::new(file.clone()),
            None => ConfigFile::empty(),
        }
    }
}
