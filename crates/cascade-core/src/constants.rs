//! Well-known names shared across the resolver.

/// File name looked up in every directory during the walk.
pub const CONFIG_FILE_NAME: &str = ".analyzerconfig";

/// Reserved key whose `true` value stops the upward walk.
pub const ROOT_KEY: &str = "root";

/// Directory under the user's config dir holding the user-wide default.
pub const USER_CONFIG_DIR: &str = "config-cascade";

/// File name of the user-wide default inside [`USER_CONFIG_DIR`].
pub const USER_DEFAULT_FILE_NAME: &str = "defaults.analyzerconfig";

/// Environment variable overriding the per-directory file name.
pub const ENV_CONFIG_FILE_NAME: &str = "CASCADE_CONFIG_FILE_NAME";

/// Environment variable naming the session default file.
pub const ENV_DEFAULT_CONFIG: &str = "CASCADE_DEFAULT_CONFIG";
