//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::style;

use crate::core::project::{Event, Reporter};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ 1 file encrypted successfully`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ no files to process found`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
///
/// Example: `⚠ Your local secrets are outdated`
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ Run `secrypt decrypt` to update local secrets`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print a hint message to stderr, for use after [`error`].
pub fn error_hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a key-value pair (label dimmed).
///
/// Example: `  config  /work/app/secrypt.config.json`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), value);
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a file transform line.
///
/// Example: `encrypt secrets.json → secrets.json.enc`
pub fn transform(action: &str, from: &str, to: &str) {
    if colors_enabled() {
        println!("{} {} → {}", style(action).dim(), path(from), path(to));
    } else {
        println!("{} {} → {}", action, from, to);
    }
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    if colors_enabled() {
        style(p).cyan().to_string()
    } else {
        p.to_string()
    }
}

/// Format a command string in green.
pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        style(c).green().to_string()
    } else {
        c.to_string()
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `no files were encrypted`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

fn files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}

/// Prints project events as they happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Reporter for Terminal {
    fn report(&self, event: Event<'_>) {
        match event {
            Event::Message(message) => println!("{}", message),
            Event::Encrypted(entry) => {
                transform("encrypt", &entry.decrypted.rel, &entry.encrypted.rel)
            }
            Event::Unchanged(entry) => dimmed(&format!("skip unchanged {}", entry.decrypted.rel)),
            Event::Decrypted(entry) => {
                transform("decrypt", &entry.encrypted.rel, &entry.decrypted.rel)
            }
            Event::EncryptFinished { count: 0 } => dimmed("no files were encrypted"),
            Event::EncryptFinished { count } => {
                success(&format!("{} encrypted successfully", files(count)))
            }
            Event::DecryptFinished { count } => {
                success(&format!("{} decrypted successfully", files(count)))
            }
            Event::Outdated { decrypting } => {
                warn("Your local secrets are outdated");
                if !decrypting {
                    hint(&format!(
                        "Run `{}` to update local secrets",
                        cmd("secrypt decrypt")
                    ));
                }
            }
            Event::Initialized {
                config_file,
                key_file,
            } => {
                success("Two new files were created:");
                kv("config", path(&config_file.display().to_string()));
                kv("keys  ", path(&key_file.display().to_string()));
                println!();
                hint("Update the config file with the file list to encrypt/decrypt.");
                hint("Make sure your unencrypted files are added to .gitignore.");
            }
            Event::KeySet {
                environment,
                key_file,
            } => success(&format!(
                "key for {} saved to {}",
                environment,
                path(&key_file.display().to_string())
            )),
            Event::KeyRegenerated { environment } => {
                success(&format!("new key generated for {}", environment))
            }
        }
    }
}
