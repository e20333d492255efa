//! Tests for environment selection and key sources.

use crate::support::*;

#[test]
fn test_encrypt_all_environments() {
    let t = Test::multienv();

    let output = t.encrypt(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "2 files encrypted successfully");
    assert!(t.exists(".env.dev.enc"));
    assert!(t.exists(".env.prod.enc"));
}

#[test]
fn test_environment_flag() {
    let t = Test::multienv();

    let output = t.encrypt(&["-e", "prod"]);
    assert_success(&output);
    assert_stdout_contains(&output, "1 file encrypted successfully");
    assert!(t.exists(".env.prod.enc"));
    assert!(!t.exists(".env.dev.enc"));
}

#[test]
fn test_environment_from_env_var() {
    let t = Test::multienv();

    assert_success(&t.run_with(&["encrypt"], &[("SECRYPT_ENV", "dev")]));
    assert!(t.exists(".env.dev.enc"));
    assert!(!t.exists(".env.prod.enc"));
}

#[test]
fn test_node_env_fallback() {
    let t = Test::multienv();

    assert_success(&t.run_with(&["encrypt"], &[("NODE_ENV", "prod")]));
    assert!(t.exists(".env.prod.enc"));
    assert!(!t.exists(".env.dev.enc"));
}

#[test]
fn test_secrypt_env_beats_node_env() {
    let t = Test::multienv();

    assert_success(&t.run_with(
        &["encrypt"],
        &[("SECRYPT_ENV", "dev"), ("NODE_ENV", "prod")],
    ));
    assert!(t.exists(".env.dev.enc"));
    assert!(!t.exists(".env.prod.enc"));
}

#[test]
fn test_bulk_keys_decrypt_only_known_environments() {
    let t = Test::multienv();
    assert_success(&t.encrypt(&[]));

    t.remove("secrypt.keys");
    t.remove(".env.dev");
    t.remove(".env.prod");

    let output = t.run_with(&["decrypt"], &[("SECRYPT_KEYS", "dev: devtest")]);
    assert_success(&output);
    assert_stdout_contains(&output, "1 file decrypted successfully");
    assert_eq!(t.read(".env.dev"), DEV_ENV);
    assert!(!t.exists(".env.prod"));
}

#[test]
fn test_per_environment_key_vars() {
    let t = Test::new();
    t.write("secrypt.config.json", MULTIENV_CONFIG);
    t.write(".env.dev", DEV_ENV);
    t.write(".env.prod", PROD_ENV);

    let keys = [("SECRYPT_KEY_DEV", "devtest"), ("SECRYPT_KEY_PROD", "prodtest")];
    assert_success(&t.run_with(&["encrypt"], &keys));
    assert!(t.exists(".env.dev.enc"));
    assert!(t.exists(".env.prod.enc"));

    t.remove(".env.dev");
    t.remove(".env.prod");

    let output = t.run_with(&["decrypt"], &[("SECRYPT_KEY_PROD", "prodtest")]);
    assert_success(&output);
    assert_eq!(t.read(".env.prod"), PROD_ENV);
    assert!(!t.exists(".env.dev"));
}

#[test]
fn test_key_file_and_env_vars_agree() {
    let t = Test::multienv();
    assert_success(&t.encrypt(&[]));
    t.remove("secrypt.keys");
    t.remove(".env.prod");

    assert_success(&t.run_with(
        &["decrypt", "-e", "prod"],
        &[("SECRYPT_KEY_PROD", "prodtest")],
    ));
    assert_eq!(t.read(".env.prod"), PROD_ENV);
}

#[test]
fn test_no_key_for_any_environment() {
    let t = Test::multienv();
    t.remove("secrypt.keys");

    let output = t.run_with(&["encrypt"], &[("SECRYPT_KEYS", "staging: x")]);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "no files to process found");
    assert_stderr_contains(&output, "no key for: dev, prod");
}
