//! Revision check command.

use crate::core::project::RevisionStatus;
use crate::error::{ConfigError, Result};

/// Check the local revision; with `--code N`, exit `N` when outdated.
pub fn execute(args: &[String]) -> Result<i32> {
    let project = super::open(args)?;

    let code = match project.config().args.get("code") {
        Some(value) => value.parse::<i32>().map_err(|_| ConfigError::InvalidValue {
            field: "code",
            reason: format!("`{}` is not an exit status", value),
        })?,
        None => 0,
    };

    match project.revision_check()? {
        RevisionStatus::UpToDate => Ok(0),
        RevisionStatus::Outdated => Ok(code),
    }
}
