//! Tests for `secrypt init`.

use crate::support::*;

/// Pin the prefix so the project root search never leaves the temp dir.
const HERE: [(&str, &str); 1] = [("SECRYPT_PREFIX", ".")];

#[test]
fn test_init_fresh_project() {
    let t = Test::new();

    let output = t.run_with(&["init"], &HERE);
    assert_success(&output);
    assert_stdout_contains(&output, "Two new files were created:");
    assert_stdout_contains(&output, "secrypt.config.json");
    assert_stdout_contains(&output, "secrypt.keys");

    let config: serde_json::Value = serde_json::from_str(&t.read("secrypt.config.json")).unwrap();
    assert_eq!(config, serde_json::json!({ "files": { "dev": [] } }));

    let keys = t.read("secrypt.keys");
    assert!(keys.starts_with("dev: "));
    assert!(keys.ends_with('\n'));
    assert!(keys.trim_end().len() > "dev: ".len() + 30);
}

#[test]
fn test_init_key_from_env() {
    let t = Test::new();

    assert_success(&t.run_with(&["init"], &[HERE[0], ("SECRYPT_KEY", "test")]));
    assert_eq!(t.read("secrypt.keys"), "dev: test\n");
}

#[test]
fn test_init_named_environment() {
    let t = Test::new();

    assert_success(&t.run_with(&["init", "-e", "prod", "--key", "p"], &HERE));
    assert_eq!(t.read("secrypt.keys"), "prod: p\n");
    assert!(t.read("secrypt.config.json").contains("\"prod\""));
}

#[test]
fn test_init_updates_gitignore() {
    let t = Test::new();
    t.write(".gitignore", "node_modules\n");

    assert_success(&t.run_with(&["init"], &HERE));
    let gitignore = t.read(".gitignore");
    assert!(gitignore.starts_with("node_modules\n"));
    assert!(gitignore.lines().any(|l| l == "secrypt.keys"));
    assert!(gitignore.lines().any(|l| l == "secrypt.rev.local"));
}

#[test]
fn test_init_already_initialized() {
    let t = Test::simple();

    let output = t.run(&["init"]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "✗");
    assert_stderr_contains(&output, "config file already exists");
    assert!(!t.exists("secrypt.keys"));
}

#[test]
fn test_init_existing_key_file() {
    let t = Test::new();
    t.write("secrypt.keys", "dev: old\n");

    let output = t.run_with(&["init"], &HERE);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "key already exists");
    assert_eq!(t.read("secrypt.keys"), "dev: old\n");
}

#[test]
fn test_init_then_encrypt() {
    let t = Test::new();
    assert_success(&t.run_with(&["init"], &HERE));

    t.write("secrypt.config.json", r#"{ "files": { "dev": [".env"] } }"#);
    t.write(".env", "TOKEN=abc\n");

    assert_success(&t.encrypt(&[]));
    t.remove(".env");
    assert_success(&t.decrypt(&[]));
    assert_eq!(t.read(".env"), "TOKEN=abc\n");
}
