//! Core library components.
//!
//! Configuration resolution, file listing, the encryption pipeline, and
//! revision tracking. Nothing here prints; progress flows through
//! [`project::Reporter`].

pub mod cipher;
pub mod config;
pub mod constants;
pub mod files;
pub mod fingerprint;
pub mod hooks;
pub mod keystore;
pub mod locate;
pub mod project;
pub mod revision;
pub mod types;
