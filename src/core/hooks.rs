//! Lifecycle hooks.
//!
//! Commands call [`Hooks::run`] at fixed points. The default implementation
//! runs shell commands configured in the project config; library users can
//! plug in callbacks by implementing the trait.

use std::collections::HashMap;
use std::fmt;
use std::process::Command;
use std::str::FromStr;

use tracing::{debug, info};

use crate::core::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Points in a command's lifecycle where hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    PreEncrypt,
    PostEncrypt,
    PreDecrypt,
    PostDecrypt,
    PreInit,
    PostInit,
    PreRevisionCheck,
    PostRevisionCheck,
    PreKeysSet,
    PostKeysSet,
    PreKeysRegenerate,
    PostKeysRegenerate,
    AlreadyInitialized,
    RevisionOutdated,
    EncryptSkipped,
}

impl HookPoint {
    /// Every hook point.
    pub const ALL: [HookPoint; 15] = [
        Self::PreEncrypt,
        Self::PostEncrypt,
        Self::PreDecrypt,
        Self::PostDecrypt,
        Self::PreInit,
        Self::PostInit,
        Self::PreRevisionCheck,
        Self::PostRevisionCheck,
        Self::PreKeysSet,
        Self::PostKeysSet,
        Self::PreKeysRegenerate,
        Self::PostKeysRegenerate,
        Self::AlreadyInitialized,
        Self::RevisionOutdated,
        Self::EncryptSkipped,
    ];

    /// Name as written in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreEncrypt => "preEncrypt",
            Self::PostEncrypt => "postEncrypt",
            Self::PreDecrypt => "preDecrypt",
            Self::PostDecrypt => "postDecrypt",
            Self::PreInit => "preInit",
            Self::PostInit => "postInit",
            Self::PreRevisionCheck => "preRevisionCheck",
            Self::PostRevisionCheck => "postRevisionCheck",
            Self::PreKeysSet => "preKeysSet",
            Self::PostKeysSet => "postKeysSet",
            Self::PreKeysRegenerate => "preKeysRegenerate",
            Self::PostKeysRegenerate => "postKeysRegenerate",
            Self::AlreadyInitialized => "alreadyInitialized",
            Self::RevisionOutdated => "revisionOutdated",
            Self::EncryptSkipped => "encryptSkipped",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookPoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|point| point.name() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "hooks",
                reason: format!("unknown hook point `{}`", s),
            })
    }
}

/// Text keyed by hook point: shell commands or static messages.
pub type HookCommands = HashMap<HookPoint, String>;

/// Parse a name-keyed map from the config file.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an unknown point name.
pub fn parse_points<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> Result<HookCommands> {
    entries
        .into_iter()
        .map(|(name, value)| -> Result<(HookPoint, String)> {
            Ok((name.parse()?, value.clone()))
        })
        .collect()
}

/// Hook runner.
///
/// Called synchronously; the command waits for `run` to return before
/// proceeding.
pub trait Hooks {
    /// Run whatever is attached to `point`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Hook` if the hook fails; the command is aborted.
    fn run(&self, point: HookPoint, config: &Config) -> Result<()>;
}

/// Runs the shell commands from the config's `hooks` section.
///
/// Commands run in the project prefix with `SECRYPT_ENVIRONMENT` and
/// `SECRYPT_PREFIX` exported. Their output goes straight to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellHooks;

impl Hooks for ShellHooks {
    fn run(&self, point: HookPoint, config: &Config) -> Result<()> {
        let Some(command) = config.hooks.get(&point) else {
            return Ok(());
        };

        info!(hook = %point, command = %command, "running hook");

        let status = shell(command)
            .current_dir(&config.prefix)
            .env("SECRYPT_ENVIRONMENT", config.environment.to_string())
            .env("SECRYPT_PREFIX", &config.prefix)
            .status()
            .map_err(|e| Error::Hook {
                point: point.to_string(),
                reason: e.to_string(),
            })?;

        debug!(hook = %point, ?status, "hook finished");

        if status.success() {
            Ok(())
        } else {
            Err(Error::Hook {
                point: point.to_string(),
                reason: format!("`{}` exited with {}", command, status),
            })
        }
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl Hooks for NoHooks {
    fn run(&self, _point: HookPoint, _config: &Config) -> Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
