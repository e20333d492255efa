//! Encrypt and decrypt commands.

use tracing::info;

use crate::error::Result;

/// Encrypt configured files.
pub fn encrypt(args: &[String]) -> Result<i32> {
    let project = super::open(args)?;
    let count = project.encrypt()?;
    info!(files = count, "encrypt finished");
    Ok(0)
}

/// Decrypt configured files.
pub fn decrypt(args: &[String]) -> Result<i32> {
    let project = super::open(args)?;
    let count = project.decrypt()?;
    info!(files = count, "decrypt finished");
    Ok(0)
}
