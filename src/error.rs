//! Error types for secrypt.
//!
//! A single crate-level [`Error`] wraps narrower enums per concern so the
//! binary can match on specific failures and print a hint.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Crypto {
        path: PathBuf,
        #[source]
        source: CryptoError,
    },

    /// The resolved file list was empty after all filters.
    #[error("no files to process found{}", skipped_hint(.skipped))]
    NoFiles {
        /// Environments that had files configured but no key.
        skipped: Vec<String>,
    },

    #[error("hook `{point}` failed: {reason}")]
    Hook { point: String, reason: String },

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn skipped_hint(skipped: &[String]) -> String {
    if skipped.is_empty() {
        String::new()
    } else {
        format!(" (no key for: {})", skipped.join(", "))
    }
}

/// Configuration and project-state errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid revision in {}: {content:?}", .path.display())]
    InvalidRevision { path: PathBuf, content: String },

    #[error("config file already exists: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("secrypt already has config in package.json")]
    PackageJsonConfigured,

    #[error("key already exists: {}", .0.display())]
    KeyFileExists(PathBuf),

    #[error("files are not configured")]
    FilesNotConfigured,

    #[error("key is required")]
    KeyRequired,

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures of the encryption pipeline.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("encrypted file is shorter than its {expected}-byte header")]
    TruncatedHeader { expected: usize },

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("ciphertext length is not a multiple of the block size")]
    InvalidLength,

    #[error("decryption failed (wrong key or corrupted file)")]
    BadDecrypt,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to an I/O error.
pub(crate) trait IoContext<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::File {
            path: path.into(),
            source,
        })
    }
}
