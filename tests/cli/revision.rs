//! Tests for `secrypt revision-check`.

use crate::support::*;

fn encrypted() -> Test {
    let t = Test::simple();
    t.write("secrypt.keys", "dev: test\n");
    assert_success(&t.encrypt(&[]));
    t
}

#[test]
fn test_encrypt_writes_revisions() {
    let t = encrypted();
    assert_eq!(t.read("secrypt.rev"), "1");
    assert_eq!(t.read("secrypt.rev.local"), "1");

    assert_success(&t.encrypt(&["--force"]));
    assert_eq!(t.read("secrypt.rev"), "2");
    assert_eq!(t.read("secrypt.rev.local"), "2");
}

#[test]
fn test_up_to_date_is_silent() {
    let t = encrypted();

    let output = t.revision_check(&[]);
    assert_code(&output, 0);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_missing_local_is_outdated() {
    let t = encrypted();
    t.remove("secrypt.rev.local");

    let output = t.revision_check(&[]);
    assert_code(&output, 0);
    assert_stdout_contains(&output, "Your local secrets are outdated");
    assert_stdout_contains(&output, "secrypt decrypt");
    assert!(!t.exists("secrypt.rev.local"));
}

#[test]
fn test_outdated_exit_code() {
    let t = encrypted();
    t.write("secrypt.rev", "2");

    assert_code(&t.revision_check(&["--code", "1"]), 1);
    assert_code(&t.revision_check(&["--code", "7"]), 7);
}

#[test]
fn test_up_to_date_ignores_exit_code() {
    let t = encrypted();
    assert_code(&t.revision_check(&["--code", "1"]), 0);
}

#[test]
fn test_invalid_exit_code() {
    let t = encrypted();

    let output = t.revision_check(&["--code", "abc"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "code");
}

#[test]
fn test_decrypt_when_outdated() {
    let t = encrypted();
    t.write("secrypt.rev", "2");
    t.write("secrets.json", "stale");

    let output = t.revision_check(&["--decrypt"]);
    assert_code(&output, 0);
    assert_stdout_contains(&output, "Your local secrets are outdated");
    assert_stdout_excludes(&output, "Run `secrypt decrypt`");
    assert_stdout_contains(&output, "1 file decrypted successfully");
    assert_eq!(t.read("secrets.json"), SIMPLE_SECRETS);
    assert_eq!(t.read("secrypt.rev.local"), "2");
}

#[test]
fn test_decrypt_updates_local_revision() {
    let t = encrypted();
    t.write("secrypt.rev", "5");

    assert_success(&t.decrypt(&[]));
    assert_eq!(t.read("secrypt.rev.local"), "5");
    assert_eq!(t.revision_check(&[]).status.code(), Some(0));
    assert_eq!(stdout(&t.revision_check(&[])), "");
}

#[test]
fn test_encrypt_bumps_from_shared() {
    let t = encrypted();
    t.write("secrypt.rev", "2");
    t.write("secrets.json", "changed");

    assert_success(&t.encrypt(&[]));
    assert_eq!(t.read("secrypt.rev"), "3");
    assert_eq!(t.read("secrypt.rev.local"), "3");
}

#[test]
fn test_malformed_revision() {
    let t = encrypted();
    t.write("secrypt.rev", "not a number");

    let output = t.revision_check(&[]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "invalid revision");
}
