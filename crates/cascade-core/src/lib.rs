//! Cascading per-directory configuration resolution
//!
//! Resolves the effective value of a configuration key for a file by
//! walking from the file's directory towards the filesystem root:
//!
//! 1. The closest directory declaring the key wins.
//! 2. A directory declaring `root = true` ends the walk.
//! 3. The session default answers whatever the walk did not.
//!
//! Loaded directories are cached per [`ConfigurationHierarchy`], and
//! [`SessionCache`] binds one hierarchy to each live analysis session
//! without keeping the session alive.
//!
//! ```no_run
//! use cascade_core::{ResolverSettings, SessionCache};
//! use std::sync::Arc;
//!
//! struct AnalysisOptions;
//!
//! let cache = SessionCache::new(ResolverSettings::default());
//! let session = Arc::new(AnalysisOptions);
//! let style = cache.try_get_value(&session, "/repo/src/main.x", "style");
//! ```

pub mod config_file;
pub mod constants;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod logging;
pub mod parser;
pub mod session;
pub mod settings;

pub use config_file::ConfigFile;
pub use error::{Error, Result};
pub use hierarchy::{ConfigurationHierarchy, Resolved, Source};
pub use loader::{ConfigFileLoader, FsConfigLoader, load_config_file};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use session::{DefaultConfig, SessionCache};
pub use settings::ResolverSettings;
