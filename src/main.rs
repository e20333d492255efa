//! secrypt - Keep encrypted secret files in your repository, per environment.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secrypt::cli::output;
use secrypt::cli::{execute, Cli};
use secrypt::core::constants;
use secrypt::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secrypt=debug")
        } else {
            EnvFilter::new("secrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli.command) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Config(ConfigError::FilesNotConfigured) => {
                    Some("add files to the config, e.g. { \"files\": { \"dev\": [\".env\"] } }")
                }
                Error::Config(ConfigError::KeyRequired) => {
                    Some("run: secrypt init, or set SECRYPT_KEY")
                }
                Error::NoFiles { skipped } if !skipped.is_empty() => {
                    Some("set the missing keys in secrypt.keys or SECRYPT_KEY_{ENV}")
                }
                Error::Crypto { .. } => Some("check that the key matches the one used to encrypt"),
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::error_hint(hint);
            }
            std::process::exit(1);
        }
    }
}
