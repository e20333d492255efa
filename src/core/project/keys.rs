//! Key management.

use indexmap::IndexMap;
use tracing::info;

use super::{Event, Project};
use crate::core::cipher;
use crate::core::files::FileEntry;
use crate::core::fingerprint::{self, Cache};
use crate::core::hooks::HookPoint;
use crate::core::keystore;
use crate::core::revision;
use crate::core::types::{EnvName, SecretKey};
use crate::error::{ConfigError, Result};

impl Project {
    /// Store `key` for the selected environment (`dev` when none is
    /// selected) in the key file, keeping every other entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key or environment name
    /// can't be represented in the key file.
    pub fn keys_set(&self, key: &str) -> Result<()> {
        let environment = self.config.environment.single_or_default();
        validate_entry(environment, key)?;

        self.run_point(HookPoint::PreKeysSet)?;

        let key_file = &self.config.key_file;
        let mut keys = keystore::read_key_file(key_file)?.unwrap_or_default();
        keys.insert(environment.to_string(), key.trim().to_string());
        keystore::write_key_file(key_file, &keys)?;

        info!(environment, "key set");
        self.reporter.report(Event::KeySet {
            environment,
            key_file,
        });

        self.run_point(HookPoint::PostKeysSet)?;
        Ok(())
    }

    /// Replace the key of every environment in scope.
    ///
    /// Files are decrypted with the old key, a new key is generated and
    /// saved, then every file is re-encrypted. The shared revision is
    /// bumped once.
    ///
    /// # Returns
    ///
    /// Environments that got a new key.
    ///
    /// # Errors
    ///
    /// Returns error if any file fails to decrypt with the old key; the
    /// key file is not touched then.
    pub fn keys_regenerate(&self) -> Result<Vec<EnvName>> {
        self.validate()?;
        self.run_point(HookPoint::PreKeysRegenerate)?;

        let mut files = self.lister.list(&self.config)?;

        for entry in &files {
            if entry.encrypted.full.exists() {
                cipher::decrypt_file(self.cipher.as_ref(), entry)?;
            }
        }

        let mut fresh: IndexMap<EnvName, SecretKey> = IndexMap::new();
        for entry in &files {
            if !fresh.contains_key(&entry.environment) {
                fresh.insert(entry.environment.clone(), keystore::generate_key());
            }
        }

        let key_file = &self.config.key_file;
        let mut keys = keystore::read_key_file(key_file)?.unwrap_or_default();
        keys.extend(fresh.clone());
        keystore::write_key_file(key_file, &keys)?;

        for entry in &mut files {
            if let Some(key) = fresh.get(&entry.environment) {
                entry.key = key.clone();
            }
        }

        let mut cache = Cache::load(&self.config.cache_file());
        let mut written = 0;
        let result = self.reencrypt(&files, &mut cache, &mut written);

        cache.save()?;
        if written > 0 {
            let revision = revision::bump(&self.config)?;
            info!(environments = fresh.len(), revision, "keys regenerated");
        }
        result?;

        for environment in fresh.keys() {
            self.reporter.report(Event::KeyRegenerated { environment });
        }

        self.run_point(HookPoint::PostKeysRegenerate)?;
        Ok(fresh.into_keys().collect())
    }

    fn reencrypt(&self, files: &[FileEntry], cache: &mut Cache, written: &mut usize) -> Result<()> {
        for entry in files {
            cipher::encrypt_file(self.cipher.as_ref(), entry)?;
            cache.record(
                &entry.decrypted.rel,
                fingerprint::of_file(&entry.key, &entry.decrypted.full)?,
            );
            self.reporter.report(Event::Encrypted(entry));
            *written += 1;
        }
        Ok(())
    }
}

/// Both sides must survive a round-trip through the key file grammar.
fn validate_entry(environment: &str, key: &str) -> Result<()> {
    let valid_name = environment
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        && !environment.contains(':')
        && !environment.contains(char::is_whitespace);
    if !valid_name {
        return Err(ConfigError::InvalidValue {
            field: "environment",
            reason: format!("`{}` can't be used as a key file entry", environment),
        }
        .into());
    }

    if key.trim().is_empty() || key.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidValue {
            field: "key",
            reason: "must be a non-empty single line".to_string(),
        }
        .into());
    }

    Ok(())
}
