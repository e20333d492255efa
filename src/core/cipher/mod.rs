//! Encryption pipeline.
//!
//! A [`Cipher`] transforms byte streams; [`encrypt_file`] and
//! [`decrypt_file`] wire it to the two sides of a [`FileEntry`] and write
//! the result atomically, so an interrupted run never leaves a partial
//! file at the destination.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Pass it to `Project::with_cipher`

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::files::FileEntry;
use crate::error::{CryptoError, Error, IoContext, Result};

mod aes;
pub mod header;

pub use aes::AesCbc;

/// Result of a stream transform.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;

/// Symmetric stream cipher keyed by a password-equivalent string.
pub trait Cipher {
    /// Encrypt everything from `input` into `output`, header first.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError` if the cipher or either stream fails.
    fn encrypt(&self, key: &str, input: &mut dyn Read, output: &mut dyn Write) -> CryptoResult<()>;

    /// Decrypt a header-prefixed stream.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError` for a truncated header, a bad key, or corrupted
    /// ciphertext.
    fn decrypt(&self, key: &str, input: &mut dyn Read, output: &mut dyn Write) -> CryptoResult<()>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Encrypt `entry.decrypted` into `entry.encrypted`.
///
/// # Errors
///
/// Returns `Error::Crypto` or an I/O error; the destination is untouched.
pub fn encrypt_file(cipher: &dyn Cipher, entry: &FileEntry) -> Result<()> {
    debug!(file = %entry.decrypted.rel, cipher = cipher.name(), "encrypting");
    transform(&entry.decrypted.full, &entry.encrypted.full, |input, output| {
        cipher.encrypt(&entry.key, input, output)
    })
}

/// Decrypt `entry.encrypted` into `entry.decrypted`.
///
/// # Errors
///
/// Returns `Error::Crypto` or an I/O error; the destination is untouched.
pub fn decrypt_file(cipher: &dyn Cipher, entry: &FileEntry) -> Result<()> {
    debug!(file = %entry.encrypted.rel, cipher = cipher.name(), "decrypting");
    transform(&entry.encrypted.full, &entry.decrypted.full, |input, output| {
        cipher.decrypt(&entry.key, input, output)
    })
}

/// Stream `src` through `apply` into a temp file next to `dst`, then rename.
fn transform<F>(src: &Path, dst: &Path, apply: F) -> Result<()>
where
    F: FnOnce(&mut dyn Read, &mut dyn Write) -> CryptoResult<()>,
{
    let mut input = File::open(src).with_path(src)?;

    let dir = match dst.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_path(dir)?;

    // Created 0600 on Unix.
    let mut tmp = NamedTempFile::new_in(dir).with_path(dir)?;

    let mut output = Tracked::new(tmp.as_file_mut());
    let result = apply(&mut input, &mut output);
    let write_failed = output.failed;

    result.map_err(|source| match source {
        CryptoError::Io(source) if write_failed => Error::File {
            path: dst.to_path_buf(),
            source,
        },
        CryptoError::Io(source) => Error::File {
            path: src.to_path_buf(),
            source,
        },
        source => Error::Crypto {
            path: src.to_path_buf(),
            source,
        },
    })?;

    tmp.as_file().sync_all().with_path(tmp.path())?;
    tmp.persist(dst).map_err(|e| Error::File {
        path: dst.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Remembers whether a write failed, so I/O errors name the right file.
struct Tracked<W> {
    inner: W,
    failed: bool,
}

impl<W: Write> Tracked<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            failed: false,
        }
    }
}

impl<W: Write> Write for Tracked<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).map_err(|e| {
            self.failed = true;
            e
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().map_err(|e| {
            self.failed = true;
            e
        })
    }
}
