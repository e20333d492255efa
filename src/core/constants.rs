//! Constants used throughout secrypt.
//!
//! Centralizes file names, environment variable names and format values.

/// Key file name, relative to the project prefix (secrypt.keys).
pub const KEY_FILE: &str = "secrypt.keys";

/// Module-style config file name (secrypt.config.toml).
pub const CONFIG_TOML: &str = "secrypt.config.toml";

/// JSON config file name (secrypt.config.json).
pub const CONFIG_JSON: &str = "secrypt.config.json";

/// Package manifest that may carry a `secrypt` field.
pub const PACKAGE_JSON: &str = "package.json";

/// Field of the package manifest holding the config.
pub const PACKAGE_FIELD: &str = "secrypt";

/// Shared revision file name (committed).
pub const REVISION_FILE: &str = "secrypt.rev";

/// Suffix appended to the shared revision file to get the local one.
pub const LOCAL_SUFFIX: &str = ".local";

/// Fingerprint cache file name (local, not committed).
pub const CACHE_FILE: &str = "secrypt.cache.json";

/// Suffix appended to a decrypted path to get its encrypted counterpart.
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Environment used when a single environment is needed but none was selected.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Name of the "all configured environments" sentinel.
pub const ALL_ENVIRONMENTS: &str = "all";

/// Project root markers, in priority order.
pub const PROJECT_MARKERS: &[&str] = &[KEY_FILE, CONFIG_TOML, CONFIG_JSON, PACKAGE_JSON];

/// Environment variable selecting the environment.
pub const ENV_ENVIRONMENT: &str = "SECRYPT_ENV";

/// Fallback environment selector understood by node tooling.
pub const ENV_NODE_ENV: &str = "NODE_ENV";

/// Environment variable overriding the prefix.
pub const ENV_PREFIX: &str = "SECRYPT_PREFIX";

/// Bulk key assignment, same grammar as the key file.
pub const ENV_KEYS: &str = "SECRYPT_KEYS";

/// Per-environment key variable prefix (`SECRYPT_KEY_DEV`, ...).
pub const ENV_KEY_PREFIX: &str = "SECRYPT_KEY_";

/// Legacy single key for the active environment.
pub const ENV_KEY: &str = "SECRYPT_KEY";

/// Log filter variable.
pub const ENV_LOG: &str = "SECRYPT_LOG";

/// Gitignore entries for local-only artifacts.
pub const GITIGNORE_ENTRIES: &[&str] = &[KEY_FILE, "secrypt.rev.local", CACHE_FILE];
