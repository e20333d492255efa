//! Test fixtures and constants.

/// Config with one `dev` file.
pub const SIMPLE_CONFIG: &str = r#"{ "files": { "dev": ["secrets.json"] } }"#;

/// Plaintext of the simple project.
pub const SIMPLE_SECRETS: &str = r#"{ "apiKey": "key", "apiSecret": "secret" }"#;

/// Config with one file per environment.
pub const MULTIENV_CONFIG: &str = r#"{ "files": { "dev": [".env.dev"], "prod": [".env.prod"] } }"#;

/// Key file for the multienv project.
pub const MULTIENV_KEYS: &str = "dev: devtest\nprod: prodtest\n";

/// Plaintext of `.env.dev`.
pub const DEV_ENV: &str = "API_URL=http://localhost\nAPI_KEY=dev-key\n";

/// Plaintext of `.env.prod`.
pub const PROD_ENV: &str = "API_URL=https://example.com\nAPI_KEY=prod-key\n";
