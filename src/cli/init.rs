//! Init command.

use crate::error::Result;

/// Create a starter config and key file.
pub fn execute(args: &[String]) -> Result<i32> {
    super::open(args)?.init()?;
    Ok(0)
}
