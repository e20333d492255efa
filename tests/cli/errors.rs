//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("revision-check"))
        .stdout(predicate::str::contains("SECRYPT_KEY"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("secrypt "));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    assert_failure(&t.run(&["unknown-command"]));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::simple();

    let output = t.run(&["--verbose", "encrypt", "--key", "test"]);
    assert_success(&output);
    assert_stderr_contains(&output, "config resolved");
}

#[test]
fn test_files_not_configured() {
    let t = Test::new();
    t.write("secrypt.config.json", "{}");

    t.cmd()
        .args(["decrypt", "--key", "test"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✗ files are not configured"));
}

#[test]
fn test_key_required() {
    let t = Test::simple();

    let output = t.encrypt(&[]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "key is required");
    assert!(!t.exists("secrets.json.enc"));
}

#[test]
fn test_malformed_config() {
    let t = Test::new();
    t.write("secrypt.config.json", "{ not json");

    let output = t.encrypt(&["--key", "test"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_missing_prefix() {
    let t = Test::simple();

    let output = t.encrypt(&["-p", "does-not-exist", "--key", "test"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "prefix");
}

#[test]
fn test_truncated_ciphertext() {
    let t = Test::simple();
    t.write("secrets.json.enc", "short");

    let output = t.decrypt(&["--key", "test"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "secrets.json.enc");
    assert_stderr_contains(&output, "64-byte header");
    assert_eq!(t.read("secrets.json"), SIMPLE_SECRETS);
}

#[test]
fn test_no_matching_files() {
    let t = Test::simple();

    let output = t.encrypt(&["--key", "test", "nothing-matches"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "no files to process found");
}
