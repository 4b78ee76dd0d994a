//! Binding configuration hierarchies to analysis sessions.
//!
//! A session is identified by the allocation of an `Arc` the host owns for
//! the duration of an analysis run (typically its options object). The cache
//! stores only a `Weak` to that allocation, so it never extends the
//! session's lifetime. Because a `Weak` keeps the allocation's address
//! reserved, a binding can never be mistaken for a later session.

use crate::constants::CONFIG_FILE_NAME;
use crate::{
    ConfigFile, ConfigFileLoader, ConfigurationHierarchy, FsConfigLoader, ResolverSettings,
    load_config_file,
};
use cascade_fs::NormalizedPath;
use dashmap::DashMap;
use std::any::Any;
use std::path::Path;
use std::sync::{Arc, OnceLock, Weak};

static GLOBAL: OnceLock<SessionCache> = OnceLock::new();

/// Where each new session's fallback configuration comes from.
#[derive(Debug, Clone, Default)]
pub enum DefaultConfig {
    /// No fallback: keys not found in the walk are not found
    #[default]
    None,
    /// Read this file once per session
    File(NormalizedPath),
    /// Use an already parsed configuration
    Inline(Arc<ConfigFile>),
}

impl DefaultConfig {
    fn load(&self) -> Arc<ConfigFile> {
        match self {
            Self::None => ConfigFile::empty(),
            Self::File(path) => load_config_file(path),
            Self::Inline(config) => Arc::clone(config),
        }
    }
}

struct Binding {
    identity: Weak<dyn Any + Send + Sync>,
    hierarchy: Arc<ConfigurationHierarchy>,
}

impl Binding {
    fn is_alive(&self) -> bool {
        self.identity.strong_count() > 0
    }
}

/// Process-wide association from live sessions to their hierarchies.
pub struct SessionCache {
    loader: Arc<dyn ConfigFileLoader>,
    default_config: DefaultConfig,
    bindings: DashMap<usize, Binding>,
}

impl SessionCache {
    /// Create a cache reading `settings.file_name` from disk.
    pub fn new(settings: ResolverSettings) -> Self {
        let default_config = settings
            .default_config
            .map(|path| DefaultConfig::File(NormalizedPath::new(path)))
            .unwrap_or_default();
        Self::with_loader(Arc::new(FsConfigLoader::new(settings.file_name)), default_config)
    }

    /// Create a cache over a custom loader.
    pub fn with_loader(loader: Arc<dyn ConfigFileLoader>, default_config: DefaultConfig) -> Self {
        Self {
            loader,
            default_config,
            bindings: DashMap::new(),
        }
    }

    /// The process-wide cache, configured by [`ResolverSettings::discover`]
    /// on first use.
    pub fn global() -> &'static SessionCache {
        GLOBAL.get_or_init(|| Self::new(ResolverSettings::discover()))
    }

    /// Install `cache` as the process-wide cache.
    ///
    /// Fails with the given cache if the global one is already initialized.
    pub fn install_global(cache: SessionCache) -> Result<(), SessionCache> {
        GLOBAL.set(cache)
    }

    /// Return the hierarchy bound to `session`, creating it on first use.
    ///
    /// Creation happens under the binding's map entry, so every caller for
    /// the same session observes the same instance.
    pub fn get_or_create<S>(&self, session: &Arc<S>) -> Arc<ConfigurationHierarchy>
    where
        S: Send + Sync + 'static,
    {
        let key = identity_key(session);
        if let Some(binding) = self.bindings.get(&key) {
            return Arc::clone(&binding.hierarchy);
        }

        self.purge();
        let binding = self.bindings.entry(key).or_insert_with(|| {
            tracing::debug!(session = key, "Creating configuration hierarchy");
            let weak: Weak<S> = Arc::downgrade(session);
            let identity: Weak<dyn Any + Send + Sync> = weak;
            Binding {
                identity,
                hierarchy: Arc::new(ConfigurationHierarchy::new(
                    Arc::clone(&self.loader),
                    self.default_config.load(),
                )),
            }
        });
        Arc::clone(&binding.hierarchy)
    }

    /// Look up `key` for `file_path` within `session`.
    pub fn try_get_value<S>(
        &self,
        session: &Arc<S>,
        file_path: impl AsRef<Path>,
        key: &str,
    ) -> Option<String>
    where
        S: Send + Sync + 'static,
    {
        self.get_or_create(session).try_get_value(file_path, key)
    }

    /// Drop the binding for `session` before the session itself goes away.
    ///
    /// Returns whether a binding existed.
    pub fn release<S>(&self, session: &Arc<S>) -> bool
    where
        S: Send + Sync + 'static,
    {
        self.bindings.remove(&identity_key(session)).is_some()
    }

    /// Drop bindings whose session is no longer referenced.
    ///
    /// Returns the number of bindings removed.
    pub fn purge(&self) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, binding| binding.is_alive());
        let removed = before.saturating_sub(self.bindings.len());
        if removed > 0 {
            tracing::debug!(removed, "Purged bindings of ended sessions");
        }
        removed
    }

    /// Number of bindings held, including ones not yet purged.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::with_loader(
            Arc::new(FsConfigLoader::new(CONFIG_FILE_NAME)),
            DefaultConfig::None,
        )
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("default_config", &self.default_config)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

fn identity_key<S>(session: &Arc<S>) -> usize {
    Arc::as_ptr(session) as *const () as usize
}
