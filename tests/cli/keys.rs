//! Tests for `secrypt keys`.

use crate::support::*;

#[test]
fn test_keys_set_default_environment() {
    let t = Test::simple();

    let output = t.run(&["keys", "set", "abc"]);
    assert_success(&output);
    assert_stdout_contains(&output, "key for dev saved to");
    assert_eq!(t.read("secrypt.keys"), "dev: abc\n");
}

#[test]
fn test_keys_set_keeps_other_environments() {
    let t = Test::multienv();

    assert_success(&t.run(&["keys", "set", "newprod", "-e", "prod"]));
    assert_eq!(t.read("secrypt.keys"), "dev: devtest\nprod: newprod\n");
}

#[test]
fn test_keys_set_then_encrypt() {
    let t = Test::simple();
    assert_success(&t.run(&["keys", "set", "abc"]));
    assert_success(&t.encrypt(&[]));

    t.remove("secrets.json");
    assert_success(&t.decrypt(&["--key", "abc"]));
    assert_eq!(t.read("secrets.json"), SIMPLE_SECRETS);
}

#[test]
fn test_keys_regenerate() {
    let t = Test::simple();
    t.write("secrypt.keys", "dev: old\n");
    assert_success(&t.encrypt(&[]));

    let output = t.run(&["keys", "regenerate"]);
    assert_success(&output);
    assert_stdout_contains(&output, "new key generated for dev");

    let keys = t.read("secrypt.keys");
    assert!(keys.starts_with("dev: "));
    assert_ne!(keys, "dev: old\n");
    assert_eq!(t.read("secrypt.rev"), "2");

    t.remove("secrets.json");
    assert_success(&t.decrypt(&[]));
    assert_eq!(t.read("secrets.json"), SIMPLE_SECRETS);
}
