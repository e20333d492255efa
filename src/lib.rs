//! secrypt - Keep encrypted secret files in your repository, per environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── lifecycle     # encrypt / decrypt
//! │   ├── init          # Starter config and key file
//! │   ├── check         # revision-check
//! │   ├── keys          # keys set / regenerate
//! │   └── output        # Terminal output and progress reporter
//! └── core/             # Core library components
//!     ├── config/       # Argument tokenizer, config files, resolver
//!     ├── keystore      # Key file grammar
//!     ├── locate        # Project root discovery
//!     ├── files         # File list resolution
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait, atomic file transforms
//!     │   ├── header    # 64-byte file header
//!     │   └── aes       # AES-256-CBC + PBKDF2-HMAC-SHA512
//!     ├── fingerprint   # Skip re-encrypting unchanged files
//!     ├── revision      # Shared and local revision counters
//!     ├── hooks         # Lifecycle hooks
//!     └── project/      # Commands
//! ```
//!
//! # Example
//!
//! ```no_run
//! use secrypt::core::config::Config;
//! use secrypt::core::project::Project;
//!
//! let config = Config::from_process(&["-e", "prod"])?;
//! let count = Project::new(config).decrypt()?;
//! println!("{} files decrypted", count);
//! # Ok::<(), secrypt::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
