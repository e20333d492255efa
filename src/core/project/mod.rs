//! The primary interface for secrypt operations.
//!
//! A [`Project`] owns the resolved configuration plus the strategies it
//! runs with, and provides every command: encrypt, decrypt, init,
//! revision check, and key management.

mod init;
mod keys;
mod lifecycle;

use std::path::Path;

use crate::core::cipher::{AesCbc, Cipher};
use crate::core::config::Config;
use crate::core::files::{DefaultFileLister, FileEntry, FileLister};
use crate::core::hooks::{HookPoint, Hooks, ShellHooks};
use crate::error::{ConfigError, Result};

pub use init::ensure_gitignore;

/// Progress of a running command, in the order it happens.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// Static message configured for a lifecycle point.
    Message(&'a str),
    Encrypted(&'a FileEntry),
    /// Encrypt skipped: plaintext unchanged since the last run.
    Unchanged(&'a FileEntry),
    Decrypted(&'a FileEntry),
    EncryptFinished { count: usize },
    DecryptFinished { count: usize },
    /// The working tree is behind the shared revision.
    Outdated { decrypting: bool },
    Initialized {
        config_file: &'a Path,
        key_file: &'a Path,
    },
    KeySet {
        environment: &'a str,
        key_file: &'a Path,
    },
    KeyRegenerated { environment: &'a str },
}

/// Receives progress events.
pub trait Reporter {
    fn report(&self, event: Event<'_>);
}

/// Discards events.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&self, _event: Event<'_>) {}
}

/// Outcome of a revision check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionStatus {
    UpToDate,
    Outdated,
}

/// A secrypt project.
///
/// Files are processed one at a time in list order. A failure aborts the
/// rest of the batch.
pub struct Project {
    pub(super) config: Config,
    pub(super) cipher: Box<dyn Cipher>,
    pub(super) lister: Box<dyn FileLister>,
    pub(super) hooks: Box<dyn Hooks>,
    pub(super) reporter: Box<dyn Reporter>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("config", &self.config)
            .field("cipher", &self.cipher.name())
            .finish_non_exhaustive()
    }
}

impl Project {
    /// A project with the default strategies: AES-256-CBC, the configured
    /// file list, shell hooks, and no progress output.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cipher: Box::new(AesCbc),
            lister: Box::new(DefaultFileLister::default()),
            hooks: Box::new(ShellHooks),
            reporter: Box::new(Silent),
        }
    }

    pub fn with_cipher(mut self, cipher: impl Cipher + 'static) -> Self {
        self.cipher = Box::new(cipher);
        self
    }

    pub fn with_lister(mut self, lister: impl FileLister + 'static) -> Self {
        self.lister = Box::new(lister);
        self
    }

    pub fn with_hooks(mut self, hooks: impl Hooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Get config reference.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the hook for `point`, then emit its static message.
    pub(super) fn run_point(&self, point: HookPoint) -> Result<()> {
        self.hooks.run(point, &self.config)?;
        if let Some(message) = self.config.message(point) {
            self.reporter.report(Event::Message(message));
        }
        Ok(())
    }

    /// Reject configs that can't produce a file list at all.
    pub(super) fn validate(&self) -> Result<()> {
        if self.config.files.is_empty() {
            return Err(ConfigError::FilesNotConfigured.into());
        }
        if self.config.keys.is_empty() {
            return Err(ConfigError::KeyRequired.into());
        }
        Ok(())
    }
}
