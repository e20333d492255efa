//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak the developer's setup into a test.
const CLEARED_VARS: &[&str] = &[
    "NODE_ENV",
    "SECRYPT_ENV",
    "SECRYPT_PREFIX",
    "SECRYPT_KEYS",
    "SECRYPT_KEY",
    "SECRYPT_KEY_DEV",
    "SECRYPT_KEY_PROD",
    "SECRYPT_LOG",
];

impl Test {
    /// Create a secrypt command running in the project directory.
    ///
    /// Secrypt variables from the outer environment are removed and
    /// colors are disabled.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secrypt").expect("failed to find secrypt binary");
        for var in CLEARED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `secrypt <args>`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run secrypt")
    }

    /// Run `secrypt <args>` with extra environment variables.
    pub fn run_with(&self, args: &[&str], vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        for (name, value) in vars {
            cmd.env(name, value);
        }
        cmd.args(args).output().expect("failed to run secrypt")
    }

    /// Shortcut for `secrypt encrypt`.
    pub fn encrypt(&self, args: &[&str]) -> Output {
        self.run(&[&["encrypt"], args].concat())
    }

    /// Shortcut for `secrypt decrypt`.
    pub fn decrypt(&self, args: &[&str]) -> Output {
        self.run(&[&["decrypt"], args].concat())
    }

    /// Shortcut for `secrypt revision-check`.
    pub fn revision_check(&self, args: &[&str]) -> Output {
        self.run(&[&["revision-check"], args].concat())
    }
}
