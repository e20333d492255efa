//! Project scaffolding.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use super::{Event, Project};
use crate::core::config::file::{self, FileConfig};
use crate::core::constants;
use crate::core::hooks::HookPoint;
use crate::core::keystore;
use crate::core::types::Keys;
use crate::error::{ConfigError, Error, IoContext, Result};

impl Project {
    /// Create a starter config and key file for the selected environment
    /// (`dev` when none is selected).
    ///
    /// The key comes from the resolved keys if one is known, otherwise it
    /// is generated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PackageJsonConfigured`,
    /// `ConfigError::AlreadyInitialized`, or `ConfigError::KeyFileExists`
    /// when the project is already set up; nothing is written then.
    pub fn init(&self) -> Result<()> {
        self.run_point(HookPoint::PreInit)?;

        if let Err(e) = self.check_uninitialized() {
            self.run_point(HookPoint::AlreadyInitialized)?;
            return Err(e);
        }

        let prefix = &self.config.prefix;
        let environment = self.config.environment.single_or_default();

        let config_file = prefix.join(constants::CONFIG_JSON);
        let mut files = IndexMap::new();
        files.insert(environment.to_string(), Vec::new());
        file::save_json(
            &config_file,
            &FileConfig {
                files,
                ..FileConfig::default()
            },
        )?;

        let key = self
            .config
            .keys
            .get(environment)
            .cloned()
            .unwrap_or_else(keystore::generate_key);
        let mut keys = Keys::new();
        keys.insert(environment.to_string(), key);
        keystore::write_key_file(&self.config.key_file, &keys)?;

        ensure_gitignore(prefix)?;

        info!(environment, config = %config_file.display(), "initialized");
        self.reporter.report(Event::Initialized {
            config_file: &config_file,
            key_file: &self.config.key_file,
        });

        self.run_point(HookPoint::PostInit)?;
        Ok(())
    }

    fn check_uninitialized(&self) -> Result<()> {
        let prefix = &self.config.prefix;

        if file::package_json_configured(prefix) {
            return Err(ConfigError::PackageJsonConfigured.into());
        }

        let existing = self.config.config_file.clone().or_else(|| {
            [constants::CONFIG_TOML, constants::CONFIG_JSON]
                .iter()
                .map(|name| prefix.join(name))
                .find(|path| path.exists())
        });
        if let Some(path) = existing {
            return Err(ConfigError::AlreadyInitialized(path).into());
        }

        if self.config.key_file.exists() {
            return Err(ConfigError::KeyFileExists(self.config.key_file.clone()).into());
        }

        Ok(())
    }
}

/// Add the key file, local revision and fingerprint cache to `.gitignore`.
///
/// # Errors
///
/// Returns error if `.gitignore` can't be read or written.
pub fn ensure_gitignore(prefix: &Path) -> Result<()> {
    let gitignore = prefix.join(".gitignore");

    let existing = match fs::read_to_string(&gitignore) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(Error::File {
                path: gitignore,
                source,
            })
        }
    };

    let mut updated = existing.clone();
    for entry in constants::GITIGNORE_ENTRIES {
        if !existing.lines().any(|l| l.trim() == *entry) {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(entry);
            updated.push('\n');
        }
    }

    if updated != existing {
        fs::write(&gitignore, updated).with_path(&gitignore)?;
    }

    Ok(())
}
