//! Project config files.
//!
//! The first of these found under the prefix is used:
//! `secrypt.config.toml`, `secrypt.config.json`, or the `secrypt` field of
//! `package.json`. An explicit `--config` path takes precedence over all.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::types::{FileMap, Keys};
use crate::error::{ConfigError, IoContext, Result};

/// Contents of a project config file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Files to encrypt, per environment.
    #[serde(default)]
    pub files: FileMap,

    /// Key file path relative to the prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,

    /// Keys embedded in the config, used only when there is no key file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Keys>,

    /// Shared revision file path relative to the prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_file: Option<String>,

    /// Shell commands to run at lifecycle points, keyed by point name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub hooks: IndexMap<String, String>,

    /// Static messages printed at lifecycle points, keyed by point name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub messages: IndexMap<String, String>,
}

/// A config file together with where it was loaded from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: FileConfig,
    pub path: PathBuf,
}

/// Config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
    PackageJson,
}

impl Format {
    fn of(path: &Path) -> Self {
        if path.file_name().is_some_and(|n| n == constants::PACKAGE_JSON) {
            Self::PackageJson
        } else if path.extension().is_some_and(|e| e == "toml") {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

/// Load the first available config.
///
/// # Errors
///
/// Returns `ConfigError::Read` if an explicit config can't be read, and
/// `ConfigError::Parse` if any config that exists is malformed.
pub fn load(prefix: &Path, explicit: Option<&str>) -> Result<Option<Loaded>> {
    if let Some(explicit) = explicit {
        let path = prefix.join(explicit);
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = parse(&path, &content)?.unwrap_or_default();
        debug!(path = %path.display(), "explicit config loaded");
        return Ok(Some(Loaded { config, path }));
    }

    let candidates = [
        constants::CONFIG_TOML,
        constants::CONFIG_JSON,
        constants::PACKAGE_JSON,
    ];

    for name in candidates {
        let path = prefix.join(name);
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        if let Some(config) = parse(&path, &content)? {
            debug!(path = %path.display(), "config loaded");
            return Ok(Some(Loaded { config, path }));
        }
    }

    debug!(prefix = %prefix.display(), "no config file found");
    Ok(None)
}

/// Parse config content according to the file's format.
///
/// Returns `None` for a package manifest without a `secrypt` field.
fn parse(path: &Path, content: &str) -> Result<Option<FileConfig>> {
    let parse_error = |reason: String| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let config = match Format::of(path) {
        Format::Toml => Some(toml::from_str(content).map_err(|e| parse_error(e.to_string()))?),
        Format::Json => {
            Some(serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?)
        }
        Format::PackageJson => {
            let mut manifest: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            match manifest.get_mut(constants::PACKAGE_FIELD) {
                Some(field) => Some(
                    serde_json::from_value(field.take())
                        .map_err(|e| parse_error(e.to_string()))?,
                ),
                None => None,
            }
        }
    };

    Ok(config)
}

/// Whether the package manifest under `prefix` carries a secrypt field.
pub fn package_json_configured(prefix: &Path) -> bool {
    fs::read_to_string(prefix.join(constants::PACKAGE_JSON))
        .ok()
        .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
        .is_some_and(|manifest| manifest.get(constants::PACKAGE_FIELD).is_some())
}

/// Write a JSON config file.
///
/// # Errors
///
/// Returns error if serialization or the write fails.
pub fn save_json(path: &Path, config: &FileConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    fs::write(path, content + "\n").with_path(path)?;
    Ok(())
}
