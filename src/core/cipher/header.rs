//! Fixed 64-byte header prepended to every encrypted file.
//!
//! | offset | length | field                  |
//! |--------|--------|------------------------|
//! | 0      | 1      | format version         |
//! | 1      | 15     | reserved, zero-filled  |
//! | 16     | 32     | PBKDF2 salt            |
//! | 48     | 16     | CBC initialization vector |

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CryptoError;

pub const HEADER_LEN: usize = 64;
pub const VERSION: u8 = 0;
pub const SALT_LEN: usize = 32;
pub const IV_LEN: usize = 16;

const SALT_OFFSET: usize = 16;
const IV_OFFSET: usize = SALT_OFFSET + SALT_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
}

impl Header {
    /// A fresh header with random salt and IV.
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);
        Self {
            version: VERSION,
            salt,
            iv,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = self.version;
        bytes[SALT_OFFSET..IV_OFFSET].copy_from_slice(&self.salt);
        bytes[IV_OFFSET..].copy_from_slice(&self.iv);
        bytes
    }

    /// Decode a header. Reserved bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedVersion` for any version but 0.
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Result<Self, CryptoError> {
        if bytes[0] != VERSION {
            return Err(CryptoError::UnsupportedVersion(bytes[0]));
        }

        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        salt.copy_from_slice(&bytes[SALT_OFFSET..IV_OFFSET]);
        iv.copy_from_slice(&bytes[IV_OFFSET..]);

        Ok(Self {
            version: bytes[0],
            salt,
            iv,
        })
    }
}
