//! Normalized path handling for the upward directory walk
//!
//! Parent computation is purely textual: no symlink resolution, no `..`
//! collapsing, no filesystem access. The walk terminates because every
//! `parent()` call strictly shortens the path and a root has no parent.

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Normalization converts backslashes to forward slashes, collapses repeated
/// separators, drops `.` segments and trailing separators. A leading `//`
/// (network share) and a drive prefix such as `C:/` are kept as the path's
/// root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// The path is converted lossily: bytes that are not valid UTF-8 become
    /// U+FFFD, so a directory with such a name is looked up under a
    /// different name and reads as having no configuration.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// True for the empty path, which has no directory to walk.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        let segment = segment.trim_start_matches(['/', '\\']);
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self::new(joined)
    }

    /// Get the parent directory.
    ///
    /// Returns `None` for a root (`/`, `C:/`, `//`) and for a single
    /// relative segment.
    pub fn parent(&self) -> Option<Self> {
        let (root, rest) = split_root(&self.inner);
        if rest.is_empty() {
            return None;
        }
        match rest.rfind('/') {
            Some(idx) => Some(Self {
                inner: format!("{}{}", root, &rest[..idx]),
            }),
            None if !root.is_empty() => Some(Self {
                inner: root.to_string(),
            }),
            None => None,
        }
    }

    /// Iterate over this path and each of its parents, closest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NormalizedPath> + '_ {
        std::iter::successors(Some(self.clone()), NormalizedPath::parent)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let (_, rest) = split_root(&self.inner);
        rest.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// True when the path starts at a root (`/`, a drive, or a share).
    pub fn is_absolute(&self) -> bool {
        !split_root(&self.inner).0.is_empty()
    }

    /// Check if this appears to be a network path (`//server/share`).
    pub fn is_network_path(&self) -> bool {
        self.inner.starts_with("//")
    }
}

/// Split a forward-slash path into its root and the remainder.
///
/// The remainder never starts with a separator.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with("//") && !path.starts_with("///") {
        return path.split_at(2);
    }
    if path.starts_with('/') {
        return ("/", path.trim_start_matches('/'));
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    {
        return (&path[..3], path[3..].trim_start_matches('/'));
    }
    ("", path)
}

fn clean(path: &str) -> String {
    let (root, rest) = split_root(path);
    let segments: Vec<&str> = rest
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let mut cleaned = String::with_capacity(path.len());
    cleaned.push_str(root);
    cleaned.push_str(&segments.join("/"));
    cleaned
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
