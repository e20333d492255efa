//! Configuration resolution.
//!
//! Merges command arguments, environment variables, the key file and the
//! project config file into one immutable [`Config`]. Process state is
//! passed in explicitly so resolution is deterministic in tests.

pub mod args;
pub mod file;

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use tracing::debug;

use crate::core::constants;
use crate::core::hooks::{self, HookCommands, HookPoint};
use crate::core::keystore;
use crate::core::locate;
use crate::core::types::{EnvName, FileMap, Keys};
use crate::error::{ConfigError, Result};

pub use args::Args;
pub use file::FileConfig;

/// Environment variables, as passed to [`Config::resolve`].
pub type Vars = HashMap<String, String>;

/// The selected environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Every configured environment.
    #[default]
    All,
    /// A single named environment.
    Named(EnvName),
}

impl Environment {
    /// Parse a selector; `all` means every environment.
    pub fn parse(value: &str) -> Self {
        if value == constants::ALL_ENVIRONMENTS {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Whether files of `env` are in scope.
    pub fn includes(&self, env: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == env,
        }
    }

    /// The named environment, or `dev` when all are selected.
    pub fn single_or_default(&self) -> &str {
        match self {
            Self::All => constants::DEFAULT_ENVIRONMENT,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(constants::ALL_ENVIRONMENTS),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected environment.
    pub environment: Environment,
    /// Absolute project root; relative paths resolve against it.
    pub prefix: PathBuf,
    /// Files per environment, in config order.
    pub files: FileMap,
    /// Keys per environment.
    pub keys: Keys,
    /// Where the key file lives.
    pub key_file: PathBuf,
    /// Shared revision file; the local one adds `.local`.
    pub revision_file: PathBuf,
    /// Positional path filters.
    pub params: Vec<String>,
    /// Remaining command flags.
    pub args: Args,
    /// Shell hooks per lifecycle point.
    pub hooks: HookCommands,
    /// Static messages per lifecycle point.
    pub messages: HookCommands,
    /// The config file in use, if any.
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from explicit process inputs.
    ///
    /// Precedence, highest first: command flags, environment variables,
    /// config file, defaults. Missing optional sources are never errors.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicit `--config` can't be read, a
    /// config file is malformed, or `--prefix` is not a directory.
    pub fn resolve<S: AsRef<str>>(args: &[S], vars: &Vars, cwd: &Path) -> Result<Self> {
        let args = Args::parse(args);

        let environment = args
            .get("environment")
            .or_else(|| var(vars, constants::ENV_ENVIRONMENT))
            .or_else(|| var(vars, constants::ENV_NODE_ENV))
            .map(Environment::parse)
            .unwrap_or_default();

        let prefix = resolve_prefix(&args, vars, cwd)?;

        let (file_config, config_file) = match file::load(&prefix, args.get("config"))? {
            Some(loaded) => (loaded.config, Some(loaded.path)),
            None => (FileConfig::default(), None),
        };

        let key_file = prefix.join(
            file_config
                .key_file
                .as_deref()
                .unwrap_or(constants::KEY_FILE),
        );

        let mut keys = match keystore::read_key_file(&key_file)? {
            Some(keys) => keys,
            None => file_config.keys.clone().unwrap_or_default(),
        };

        apply_key_overrides(&mut keys, &file_config.files, &environment, vars);

        if let Some(key) = args.get("key") {
            keys.insert(environment.single_or_default().to_string(), key.to_string());
        }

        let revision_file = prefix.join(
            args.get("revisionFile")
                .or(file_config.revision_file.as_deref())
                .unwrap_or(constants::REVISION_FILE),
        );

        let config = Self {
            hooks: hooks::parse_points(&file_config.hooks)?,
            messages: hooks::parse_points(&file_config.messages)?,
            files: file_config.files,
            params: args.params().to_vec(),
            environment,
            prefix,
            keys,
            key_file,
            revision_file,
            args,
            config_file,
        };

        debug!(
            environment = %config.environment,
            prefix = %config.prefix.display(),
            environments = config.files.len(),
            keys = config.keys.len(),
            "config resolved"
        );

        Ok(config)
    }

    /// Resolve from the current process.
    ///
    /// # Errors
    ///
    /// Same as [`Config::resolve`], plus failure to read the working directory.
    pub fn from_process<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let vars: Vars = std::env::vars().collect();
        Self::resolve(args, &vars, &cwd)
    }

    /// Whether `--force` was given.
    pub fn force(&self) -> bool {
        self.args.is_set("force")
    }

    /// The local revision file.
    pub fn local_revision_file(&self) -> PathBuf {
        with_suffix(&self.revision_file, constants::LOCAL_SUFFIX)
    }

    /// The fingerprint cache file.
    pub fn cache_file(&self) -> PathBuf {
        self.prefix.join(constants::CACHE_FILE)
    }

    /// Static message for a lifecycle point.
    pub fn message(&self, point: HookPoint) -> Option<&str> {
        self.messages.get(&point).map(String::as_str)
    }

    /// Path relative to the prefix, for display.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.prefix)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Non-empty environment variable.
fn var<'a>(vars: &'a Vars, name: &str) -> Option<&'a str> {
    vars.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

fn resolve_prefix(args: &Args, vars: &Vars, cwd: &Path) -> Result<PathBuf> {
    if let Some(prefix) = args.get("prefix") {
        let prefix = normalize(&cwd.join(prefix));
        if !prefix.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: format!("{} is not a directory", prefix.display()),
            }
            .into());
        }
        return Ok(prefix);
    }

    if let Some(prefix) = var(vars, constants::ENV_PREFIX) {
        let prefix = normalize(&cwd.join(prefix));
        if prefix.is_dir() {
            return Ok(prefix);
        }
        debug!(prefix = %prefix.display(), "ignoring missing prefix from environment");
    }

    Ok(locate::locate(constants::PROJECT_MARKERS, cwd).unwrap_or_else(|| cwd.to_path_buf()))
}

/// Apply key overrides from the environment, lowest precedence first:
/// bulk `SECRYPT_KEYS`, per-environment `SECRYPT_KEY_{ENV}`, then
/// `SECRYPT_KEY` for the selected environment (`dev` when all are).
fn apply_key_overrides(keys: &mut Keys, files: &FileMap, environment: &Environment, vars: &Vars) {
    if let Some(bulk) = var(vars, constants::ENV_KEYS) {
        keys.extend(keystore::parse_keys(bulk));
    }

    let mut names: IndexSet<EnvName> = files.keys().chain(keys.keys()).cloned().collect();
    if let Environment::Named(name) = environment {
        names.insert(name.clone());
    }

    for name in names {
        if let Some(key) = var(vars, &env_key_var(&name)) {
            keys.insert(name, key.to_string());
        }
    }

    if let Some(key) = var(vars, constants::ENV_KEY) {
        keys.insert(environment.single_or_default().to_string(), key.to_string());
    }
}

/// Variable carrying the key of one environment (`SECRYPT_KEY_PROD`).
pub fn env_key_var(environment: &str) -> String {
    let suffix: String = environment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", constants::ENV_KEY_PREFIX, suffix)
}

/// Append a suffix to a path's final component.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
