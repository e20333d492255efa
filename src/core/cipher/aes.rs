//! AES-256-CBC backend with PBKDF2-HMAC-SHA512 key derivation.
//!
//! Both directions stream in fixed chunks; memory use does not depend on
//! file size. Decryption holds back the final block until end of input so
//! PKCS#7 padding can be validated and stripped.

use std::io::{self, Read, Write};

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use sha2::Sha512;
use tracing::trace;
use zeroize::Zeroizing;

use super::header::{Header, HEADER_LEN};
use super::{Cipher, CryptoResult};
use crate::error::CryptoError;

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

pub const ITERATIONS: u32 = 100_000;
const KEY_LEN: usize = 32;
const BLOCK: usize = 16;
const CHUNK: usize = 64 * 1024;

/// AES-256-CBC with a per-file salt and IV.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesCbc;

impl Cipher for AesCbc {
    fn name(&self) -> &'static str {
        "aes-256-cbc"
    }

    fn encrypt(&self, key: &str, input: &mut dyn Read, output: &mut dyn Write) -> CryptoResult<()> {
        let header = Header::generate();
        let derived = derive_key(key, &header.salt);
        let mut cipher = Encryptor::new_from_slices(&derived[..], &header.iv)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        output.write_all(&header.to_bytes())?;

        let mut buf = Zeroizing::new(vec![0u8; CHUNK]);
        let mut total = 0usize;

        let tail = loop {
            let n = read_full(input, &mut buf[..])?;
            total += n;
            if n < CHUNK {
                break n;
            }
            encrypt_blocks(&mut cipher, &mut buf[..]);
            output.write_all(&buf[..])?;
        };

        let full = tail - tail % BLOCK;
        encrypt_blocks(&mut cipher, &mut buf[..full]);
        let padded = cipher
            .encrypt_padded_mut::<Pkcs7>(&mut buf[full..full + BLOCK], tail - full)
            .map_err(|_| CryptoError::EncryptionFailed("padding failed".to_string()))?
            .len();
        output.write_all(&buf[..full + padded])?;
        output.flush()?;

        trace!(plaintext_len = total, "encrypted");
        Ok(())
    }

    fn decrypt(&self, key: &str, input: &mut dyn Read, output: &mut dyn Write) -> CryptoResult<()> {
        let mut raw = [0u8; HEADER_LEN];
        if read_full(input, &mut raw)? < HEADER_LEN {
            return Err(CryptoError::TruncatedHeader {
                expected: HEADER_LEN,
            });
        }
        let header = Header::from_bytes(&raw)?;

        let derived = derive_key(key, &header.salt);
        let mut cipher = Decryptor::new_from_slices(&derived[..], &header.iv)
            .map_err(|_| CryptoError::BadDecrypt)?;

        // Room for one held-back block plus a full chunk.
        let mut buf = Zeroizing::new(vec![0u8; CHUNK + BLOCK]);
        let mut held = 0usize;
        let mut total = 0usize;

        let filled = loop {
            let n = read_full(input, &mut buf[held..])?;
            let filled = held + n;
            if filled < buf.len() {
                break filled;
            }

            let ready = filled - BLOCK;
            decrypt_blocks(&mut cipher, &mut buf[..ready]);
            output.write_all(&buf[..ready])?;
            total += ready;

            buf.copy_within(ready..filled, 0);
            held = BLOCK;
        };

        if filled == 0 || filled % BLOCK != 0 {
            return Err(CryptoError::InvalidLength);
        }

        let last = filled - BLOCK;
        decrypt_blocks(&mut cipher, &mut buf[..last]);
        let unpadded = cipher
            .decrypt_padded_mut::<Pkcs7>(&mut buf[last..filled])
            .map_err(|_| CryptoError::BadDecrypt)?
            .len();
        output.write_all(&buf[..last + unpadded])?;
        output.flush()?;

        trace!(plaintext_len = total + last + unpadded, "decrypted");
        Ok(())
    }
}

/// Derive the 256-bit cipher key from a key string and salt.
fn derive_key(key: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut derived = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha512>(key.as_bytes(), salt, ITERATIONS, &mut derived[..]);
    derived
}

fn encrypt_blocks(cipher: &mut Encryptor, data: &mut [u8]) {
    for block in data.chunks_exact_mut(BLOCK) {
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }
}

fn decrypt_blocks(cipher: &mut Decryptor, data: &mut [u8]) {
    for block in data.chunks_exact_mut(BLOCK) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }
}

/// Read until `buf` is full or the input ends.
fn read_full(input: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
