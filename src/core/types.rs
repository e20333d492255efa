//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use indexmap::IndexMap;

/// An environment name (e.g., dev, prod).
pub type EnvName = String;

/// A secret key string used as the PBKDF2 password.
pub type SecretKey = String;

/// A path relative to the project prefix.
pub type RelPath = String;

/// Environment name to key, in file order.
pub type Keys = IndexMap<EnvName, SecretKey>;

/// Environment name to the files it owns, in config order.
pub type FileMap = IndexMap<EnvName, Vec<RelPath>>;
