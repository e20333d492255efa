//! Tests for config hooks and messages.

use crate::support::*;

#[test]
fn test_post_decrypt_hook_runs_after_files() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "hooks": { "postDecrypt": "echo Post decrypt hook" }
        }"#,
    );
    assert_success(&t.encrypt(&["--key", "test"]));

    let output = t.decrypt(&["--key", "test"]);
    assert_success(&output);
    assert_stdout_order(&output, "decrypted successfully", "Post decrypt hook");
}

#[test]
fn test_message_printed_before_files() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "messages": { "preEncrypt": "Encrypting secrets" }
        }"#,
    );

    let output = t.encrypt(&["--key", "test"]);
    assert_success(&output);
    assert_stdout_order(&output, "Encrypting secrets", "encrypt secrets.json");
}

#[test]
fn test_hook_sees_environment() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "hooks": { "preEncrypt": "echo env=$SECRYPT_ENVIRONMENT" }
        }"#,
    );

    let output = t.encrypt(&["-e", "dev", "--key", "test"]);
    assert_success(&output);
    assert_stdout_contains(&output, "env=dev");
}

#[test]
fn test_skipped_hook() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "hooks": { "encryptSkipped": "echo skipped hook" }
        }"#,
    );
    assert_success(&t.encrypt(&["--key", "test"]));

    let output = t.encrypt(&["--key", "test"]);
    assert_success(&output);
    assert_stdout_order(&output, "skip unchanged secrets.json", "skipped hook");
}

#[test]
fn test_failing_hook_aborts() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "hooks": { "preEncrypt": "exit 3" }
        }"#,
    );

    let output = t.encrypt(&["--key", "test"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "hook `preEncrypt` failed");
    assert!(!t.exists("secrets.json.enc"));
}

#[test]
fn test_unknown_hook_point_rejected() {
    let t = Test::simple();
    t.write(
        "secrypt.config.json",
        r#"{
            "files": { "dev": ["secrets.json"] },
            "hooks": { "preFrobnicate": "true" }
        }"#,
    );

    let output = t.encrypt(&["--key", "test"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "unknown hook point `preFrobnicate`");
}
