//! Error types for cascade-core
//!
//! Lookups never surface these: the loader degrades every failure to an
//! empty configuration. They are returned by settings loading and by
//! direct calls to the parser.

use std::path::PathBuf;

/// Result type for cascade-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cascade-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration text could not be parsed
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: crate::ParseError,
    },

    /// Resolver settings are unusable
    #[error("Invalid resolver settings: {message}")]
    Settings { message: String },

    /// Filesystem error from cascade-fs
    #[error(transparent)]
    Fs(#[from] cascade_fs::Error),
}
