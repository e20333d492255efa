//! Command-line interface.
//!
//! clap selects the command; everything after it is handed verbatim to
//! the config resolver, which owns flag and filter parsing.

pub mod check;
pub mod init;
pub mod keys;
pub mod lifecycle;
pub mod output;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::project::Project;
use crate::error::Result;

const OPTIONS_HELP: &str = "\
Options (after the command):
  -c, --config PATH        Config file path (default: secrypt.config.toml, secrypt.config.json, package.json)
  -e, --environment ENV    Environment name (default: all)
  -p, --prefix PATH        Project root (default: nearest directory with a secrypt file)
      --key KEY            Key for the selected environment
      --force              Encrypt even unchanged files

Environment variables:
  SECRYPT_ENV, NODE_ENV    Environment name
  SECRYPT_PREFIX           Project root
  SECRYPT_KEYS             Keys, one `env: key` per line
  SECRYPT_KEY_{ENV}        Key for one environment
  SECRYPT_KEY              Key for the selected environment
  SECRYPT_LOG              Log filter (e.g. secrypt=debug)";

/// secrypt - Keep encrypted secret files in your repository.
#[derive(Parser)]
#[command(
    name = "secrypt",
    about = "Keep encrypted secret files in your repository, per environment",
    version,
    after_help = OPTIONS_HELP
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt configured files (only those ending with FILTERS, if given)
    Encrypt {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FILTERS|OPTIONS")]
        args: Vec<String>,
    },

    /// Decrypt configured files (only those ending with FILTERS, if given)
    Decrypt {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FILTERS|OPTIONS")]
        args: Vec<String>,
    },

    /// Create a starter config and key file
    Init {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
        args: Vec<String>,
    },

    /// Check whether local secrets match the last encrypted revision
    #[command(after_help = "\
Options:
  --decrypt       Decrypt when outdated
  --code N        Exit with status N when outdated")]
    RevisionCheck {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
        args: Vec<String>,
    },

    /// Manage keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
}

/// Key subcommands.
#[derive(Subcommand)]
pub enum KeysAction {
    /// Save a key for the selected environment (dev by default)
    Set {
        /// The key
        key: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
        args: Vec<String>,
    },

    /// Generate new keys and re-encrypt all files with them
    Regenerate {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
        args: Vec<String>,
    },
}

/// Execute a command.
///
/// # Returns
///
/// The process exit status.
pub fn execute(command: Command) -> Result<i32> {
    use Command::*;

    match command {
        Encrypt { args } => lifecycle::encrypt(&args),
        Decrypt { args } => lifecycle::decrypt(&args),
        Init { args } => init::execute(&args),
        RevisionCheck { args } => check::execute(&args),
        Keys { action } => match action {
            KeysAction::Set { key, args } => keys::set(&key, &args),
            KeysAction::Regenerate { args } => keys::regenerate(&args),
        },
    }
}

/// Resolve config from the process and open a project that prints progress.
fn open(args: &[String]) -> Result<Project> {
    let config = Config::from_process(args)?;
    Ok(Project::new(config).with_reporter(output::Terminal))
}
