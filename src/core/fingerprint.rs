//! Plaintext fingerprints for skipping unchanged files on encrypt.
//!
//! Fingerprints are SHA-256 over `key || 0x00 || plaintext`, so changing
//! a key invalidates them. The cache is a local, ignored JSON file mapping
//! each decrypted path (relative to the prefix) to its last fingerprint.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{ConfigError, IoContext, Result};

/// Fingerprint of one plaintext file.
///
/// # Errors
///
/// Returns error if the file can't be read.
pub fn of_file(key: &str, path: &Path) -> Result<String> {
    let mut file = File::open(path).with_path(path)?;
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update([0u8]);
    io::copy(&mut file, &mut hasher).with_path(path)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Fingerprints recorded by earlier runs.
#[derive(Debug, Default)]
pub struct Cache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl Cache {
    /// Load the cache; a missing or unreadable cache is empty.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt fingerprint cache");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path: path.to_path_buf(),
            entries,
            dirty: false,
        }
    }

    /// Whether `rel` was last seen with this fingerprint.
    pub fn matches(&self, rel: &str, fingerprint: &str) -> bool {
        self.entries.get(rel).is_some_and(|f| f == fingerprint)
    }

    pub fn record(&mut self, rel: &str, fingerprint: String) {
        if self.entries.get(rel) != Some(&fingerprint) {
            self.entries.insert(rel.to_string(), fingerprint);
            self.dirty = true;
        }
    }

    /// Write the cache if anything changed.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let content = serde_json::to_string_pretty(&self.entries).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, content + "\n").with_path(&self.path)?;
        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.entries.len(), "fingerprint cache saved");
        Ok(())
    }
}
