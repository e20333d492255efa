//! File list resolution.
//!
//! Expands the per-environment file map into concrete decrypted/encrypted
//! path pairs for one command invocation.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::config::{with_suffix, Config};
use crate::core::constants;
use crate::core::types::{EnvName, RelPath, SecretKey};
use crate::error::{Error, Result};

/// A path both absolute and relative to the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath {
    pub full: PathBuf,
    pub rel: RelPath,
}

/// One file to encrypt or decrypt.
#[derive(Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub decrypted: FilePath,
    pub encrypted: FilePath,
    pub key: SecretKey,
    pub environment: EnvName,
}

impl std::fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntry")
            .field("decrypted", &self.decrypted)
            .field("encrypted", &self.encrypted)
            .field("key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Maps a decrypted path to its encrypted counterpart.
pub trait PathResolver {
    fn encrypted_path(&self, decrypted: &Path) -> PathBuf;
}

/// Appends `.enc` to the decrypted path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixResolver;

impl PathResolver for SuffixResolver {
    fn encrypted_path(&self, decrypted: &Path) -> PathBuf {
        with_suffix(decrypted, constants::ENCRYPTED_SUFFIX)
    }
}

/// Produces the list of files a command works on.
pub trait FileLister {
    /// List files for the resolved config.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoFiles` when nothing is left after filtering.
    fn list(&self, config: &Config) -> Result<Vec<FileEntry>>;
}

/// Lists files from `config.files`.
///
/// Environments without a key, or not selected, are skipped. Entries where
/// neither side exists on disk are dropped. Positional params keep only
/// entries whose decrypted path ends with one of them.
pub struct DefaultFileLister<R = SuffixResolver> {
    resolver: R,
}

impl Default for DefaultFileLister {
    fn default() -> Self {
        Self {
            resolver: SuffixResolver,
        }
    }
}

impl<R: PathResolver> DefaultFileLister<R> {
    /// Use a custom encrypted-path resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    fn entry(&self, config: &Config, env: &str, key: &str, rel: &str) -> FileEntry {
        let decrypted = config.prefix.join(rel);
        let encrypted = self.resolver.encrypted_path(&decrypted);

        FileEntry {
            decrypted: FilePath {
                rel: config.relative(&decrypted),
                full: decrypted,
            },
            encrypted: FilePath {
                rel: config.relative(&encrypted),
                full: encrypted,
            },
            key: key.to_string(),
            environment: env.to_string(),
        }
    }
}

impl<R: PathResolver> FileLister for DefaultFileLister<R> {
    fn list(&self, config: &Config) -> Result<Vec<FileEntry>> {
        let mut list = Vec::new();
        let mut skipped = Vec::new();

        for (env, paths) in &config.files {
            if !config.environment.includes(env) {
                continue;
            }

            let key = match config.keys.get(env) {
                Some(key) if !key.is_empty() => key,
                _ => {
                    if !paths.is_empty() {
                        warn!(environment = %env, "no key, skipping environment");
                        skipped.push(env.clone());
                    }
                    continue;
                }
            };

            for rel in paths {
                let entry = self.entry(config, env, key, rel);

                if !entry.decrypted.full.exists() && !entry.encrypted.full.exists() {
                    debug!(file = %entry.decrypted.rel, "neither side exists, skipping");
                    continue;
                }

                if !config.params.is_empty() && !matches_params(&entry, &config.params) {
                    continue;
                }

                list.push(entry);
            }
        }

        if list.is_empty() {
            return Err(Error::NoFiles { skipped });
        }

        debug!(files = list.len(), "file list resolved");
        Ok(list)
    }
}

fn matches_params(entry: &FileEntry, params: &[String]) -> bool {
    let full = entry.decrypted.full.to_string_lossy();
    params.iter().any(|param| full.ends_with(param.as_str()))
}
