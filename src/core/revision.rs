//! Revision tracking.
//!
//! The shared counter is committed next to the encrypted files and bumped
//! on every encrypt that writes something. The local counter (`.local`
//! suffix, ignored) records which shared revision the working tree was
//! last decrypted or encrypted at.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::error::{ConfigError, IoContext, Result};

/// Which revision file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Shared,
    Local,
}

impl Side {
    fn path(self, config: &Config) -> PathBuf {
        match self {
            Self::Shared => config.revision_file.clone(),
            Self::Local => config.local_revision_file(),
        }
    }
}

/// Read a revision, `None` when the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError::InvalidRevision` if the file is not a single
/// non-negative integer.
pub fn read(config: &Config, side: Side) -> Result<Option<u64>> {
    let path = side.path(config);
    match fs::read_to_string(&path) {
        Ok(content) => parse(&path, &content).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_path(path),
    }
}

/// Read a revision, 0 when the file does not exist.
///
/// # Errors
///
/// See [`read`].
pub fn read_revision(config: &Config, side: Side) -> Result<u64> {
    Ok(read(config, side)?.unwrap_or(0))
}

/// Write a revision.
///
/// # Errors
///
/// Returns error if the file can't be written.
pub fn write_revision(config: &Config, side: Side, value: u64) -> Result<()> {
    let path = side.path(config);
    fs::write(&path, value.to_string()).with_path(&path)?;
    debug!(?side, revision = value, "revision written");
    Ok(())
}

/// After an encrypt that wrote files: bump shared, align local.
///
/// # Errors
///
/// Returns error if either file can't be read or written.
pub fn bump(config: &Config) -> Result<u64> {
    let next = read_revision(config, Side::Shared)? + 1;
    write_revision(config, Side::Shared, next)?;
    write_revision(config, Side::Local, next)?;
    Ok(next)
}

/// After a decrypt: align local with shared.
///
/// # Errors
///
/// Returns error if either file can't be read or written.
pub fn sync_local(config: &Config) -> Result<u64> {
    let shared = read_revision(config, Side::Shared)?;
    write_revision(config, Side::Local, shared)?;
    Ok(shared)
}

/// Whether the working tree is behind the shared revision.
///
/// A missing local file counts as outdated; a local revision ahead of the
/// shared one does not.
///
/// # Errors
///
/// Returns error if either file is unreadable or malformed.
pub fn is_outdated(config: &Config) -> Result<bool> {
    let shared = read_revision(config, Side::Shared)?;
    let outdated = match read(config, Side::Local)? {
        Some(local) => local < shared,
        None => true,
    };
    debug!(shared, outdated, "revision checked");
    Ok(outdated)
}

fn parse(path: &Path, content: &str) -> Result<u64> {
    content.trim().parse().map_err(|_| {
        ConfigError::InvalidRevision {
            path: path.to_path_buf(),
            content: content.to_string(),
        }
        .into()
    })
}
