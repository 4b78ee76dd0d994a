//! Filesystem layer for Config Cascade
//!
//! Provides string-based path handling for the directory walk and the
//! read-only I/O the configuration loader needs.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
