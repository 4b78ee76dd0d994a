//! The declarations of a single directory.

use crate::constants::ROOT_KEY;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static EMPTY: LazyLock<Arc<ConfigFile>> = LazyLock::new(|| Arc::new(ConfigFile::default()));

/// Immutable key/value declarations for one directory.
///
/// Keys are matched exactly. The root flag is computed once at
/// construction from the `root` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    entries: HashMap<String, String>,
    is_root: bool,
}

impl ConfigFile {
    /// Build from key/value pairs. A repeated key keeps its last value.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries: HashMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let is_root = entries
            .get(ROOT_KEY)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        Self { entries, is_root }
    }

    /// The shared empty configuration: no entries, not a root.
    pub fn empty() -> Arc<Self> {
        Arc::clone(&EMPTY)
    }

    /// Exact-match lookup.
    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True iff `root` is declared and reads as `true`, ignoring case.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all declarations in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
