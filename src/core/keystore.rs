//! Key file storage.
//!
//! The key file is plain text, one `environment: secret` pair per line.
//! Lines that don't start with a word character are ignored, so blank
//! lines and `#` comments are allowed.

use std::fs;
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::types::Keys;
use crate::error::{IoContext, Result};

/// Parse key file content.
///
/// Each line starting with a word character is split on the first `:`.
/// The name and the secret are trimmed; colons inside the secret are kept.
pub fn parse_keys(content: &str) -> Keys {
    let mut keys = Keys::new();

    for line in content.lines() {
        if !line.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        let (name, secret) = match line.split_once(':') {
            Some((name, secret)) => (name, secret),
            None => (line, ""),
        };

        keys.insert(name.trim().to_string(), secret.trim().to_string());
    }

    keys
}

/// Serialize keys to the key file format, with a trailing newline.
pub fn format_keys(keys: &Keys) -> String {
    let mut output = String::new();
    for (name, secret) in keys {
        output.push_str(&format!("{}: {}\n", name, secret));
    }
    output
}

/// Read a key file.
///
/// Returns `Ok(None)` when the file doesn't exist so callers can fall back
/// to other key sources.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_key_file(path: &Path) -> Result<Option<Keys>> {
    if !path.is_file() {
        debug!(path = %path.display(), "no key file");
        return Ok(None);
    }

    let content = Zeroizing::new(fs::read_to_string(path).with_path(path)?);
    let keys = parse_keys(&content);
    debug!(path = %path.display(), environments = keys.len(), "key file loaded");

    Ok(Some(keys))
}

/// Write a key file, replacing any existing content.
///
/// The file is created with mode 0600 on Unix.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_key_file(path: &Path, keys: &Keys) -> Result<()> {
    let content = Zeroizing::new(format_keys(keys));

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)
            .with_path(path)?;
        file.write_all(content.as_bytes()).with_path(path)?;
        file.flush().with_path(path)?;

        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).with_path(path)?;
    }

    #[cfg(not(unix))]
    {
        let mut file = fs::File::create(path).with_path(path)?;
        file.write_all(content.as_bytes()).with_path(path)?;
    }

    debug!(path = %path.display(), environments = keys.len(), "key file written");
    Ok(())
}

/// Generate a new random key.
///
/// 32 random bytes, base64url encoded with non-word characters removed.
pub fn generate_key() -> String {
    let mut bytes = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut bytes[..]);

    URL_SAFE_NO_PAD
        .encode(&bytes[..])
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
