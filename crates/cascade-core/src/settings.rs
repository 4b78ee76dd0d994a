//! Resolver settings
//!
//! Settings come from, in increasing precedence:
//! 1. Built-in defaults (`.analyzerconfig`, no session default)
//! 2. A settings file (`.toml`, `.json`, `.yaml`) passed to [`ResolverSettings::load`]
//! 3. Environment overrides (`CASCADE_CONFIG_FILE_NAME`, `CASCADE_DEFAULT_CONFIG`)
//!
//! [`ResolverSettings::discover`] additionally picks up a user-wide default
//! file from the platform config directory when none is configured.

use crate::constants::{
    CONFIG_FILE_NAME, ENV_CONFIG_FILE_NAME, ENV_DEFAULT_CONFIG, USER_CONFIG_DIR,
    USER_DEFAULT_FILE_NAME,
};
use crate::{Error, Result};
use cascade_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the resolver finds configuration on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// File name looked up in each directory
    pub file_name: String,

    /// File loaded once per session as the final fallback
    pub default_config: Option<PathBuf>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            file_name: CONFIG_FILE_NAME.to_string(),
            default_config: None,
        }
    }
}

impl ResolverSettings {
    /// Load settings from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let settings: Self = ConfigStore::new().load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from the process environment.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|name| std::env::var(name).ok());
        settings
    }

    /// Environment settings plus the user-wide default file if present.
    pub fn discover() -> Self {
        let mut settings = Self::from_env();
        if settings.default_config.is_none() {
            settings.default_config = Self::user_default_config().filter(|path| path.is_file());
        }
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "Ignoring invalid resolver settings, using defaults");
            return Self::default();
        }
        tracing::debug!(?settings, "Discovered resolver settings");
        settings
    }

    /// Apply overrides through `lookup`, which maps a variable name to its
    /// value. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(file_name) = lookup(ENV_CONFIG_FILE_NAME) {
            self.file_name = file_name.trim().to_string();
        }
        if let Some(default_config) = lookup(ENV_DEFAULT_CONFIG) {
            self.default_config = Some(PathBuf::from(default_config));
        }
    }

    /// Check that the file name is a single, non-empty path component.
    pub fn validate(&self) -> Result<()> {
        let name = self.file_name.trim();
        if name.is_empty() || name == "." || name == ".." {
            return Err(Error::Settings {
                message: format!("file_name {:?} is not a file name", self.file_name),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(Error::Settings {
                message: format!("file_name {:?} must not contain separators", self.file_name),
            });
        }
        Ok(())
    }

    /// Location of the user-wide default file:
    /// - Linux: `~/.config/config-cascade/defaults.analyzerconfig`
    /// - macOS: `~/Library/Application Support/config-cascade/defaults.analyzerconfig`
    /// - Windows: `%APPDATA%\config-cascade\defaults.analyzerconfig`
    pub fn user_default_config() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_DEFAULT_FILE_NAME))
    }
}
