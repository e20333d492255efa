//! Key management commands.

use crate::error::Result;

/// Save a key for the selected environment.
pub fn set(key: &str, args: &[String]) -> Result<i32> {
    super::open(args)?.keys_set(key)?;
    Ok(0)
}

/// Regenerate keys and re-encrypt.
pub fn regenerate(args: &[String]) -> Result<i32> {
    let environments = super::open(args)?.keys_regenerate()?;
    tracing::debug!(?environments, "regenerated");
    Ok(0)
}
