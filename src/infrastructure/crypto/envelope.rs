//! Symmetric encryption envelope for secrets at rest
//!
//! AES-256-CBC under a single process-wide key. Every encryption draws a
//! fresh random 16-byte IV; the IV is stored alongside the ciphertext and
//! both travel as opaque base64 strings. IV reuse under the same key leaks
//! plaintext structure in CBC mode, so the IV is generated inside
//! `encrypt` and cannot be supplied by callers.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::domain::DomainError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const KEY_LENGTH: usize = 32;
const IV_LENGTH: usize = 16;

/// Envelope output: base64 ciphertext plus the base64 IV that produced it.
/// The two are persisted together, never independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecret {
    pub ciphertext: String,
    pub iv: String,
}

/// AES-256-CBC envelope over a fixed 32-byte key
///
/// The key comes from external configuration and is injected at
/// construction; it is never derived from or stored alongside the data it
/// protects. Key material is zeroized on drop.
pub struct EncryptionEnvelope {
    key: Zeroizing<[u8; KEY_LENGTH]>,
}

impl std::fmt::Debug for EncryptionEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionEnvelope")
            .field("key", &"[hidden]")
            .finish()
    }
}

impl EncryptionEnvelope {
    /// Create an envelope from a raw 32-byte key
    pub fn new(key: [u8; KEY_LENGTH]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Create an envelope from a base64-encoded key.
    ///
    /// The decoded key must be at least 32 bytes; longer keys are truncated
    /// to 32. Anything shorter is a configuration error, not a runtime one.
    pub fn from_base64(key_base64: &str) -> Result<Self, DomainError> {
        let mut decoded = STANDARD.decode(key_base64.trim()).map_err(|e| {
            DomainError::configuration(format!("Encryption key is not valid base64: {}", e))
        })?;

        if decoded.len() < KEY_LENGTH {
            decoded.zeroize();
            return Err(DomainError::configuration(format!(
                "Encryption key must decode to at least {} bytes",
                KEY_LENGTH
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&decoded[..KEY_LENGTH]);
        decoded.zeroize();

        Ok(Self::new(key))
    }

    /// Encrypt a plaintext secret with a fresh random IV
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret, DomainError> {
        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&(*self.key).into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(EncryptedSecret {
            ciphertext: STANDARD.encode(ciphertext),
            iv: STANDARD.encode(iv),
        })
    }

    /// Decrypt a stored secret using the IV persisted with it
    pub fn decrypt(&self, ciphertext: &str, iv: &str) -> Result<String, DomainError> {
        let iv_bytes = STANDARD
            .decode(iv)
            .map_err(|e| DomainError::crypto(format!("IV is not valid base64: {}", e)))?;

        if iv_bytes.len() != IV_LENGTH {
            return Err(DomainError::crypto(format!(
                "Invalid IV length: expected {} bytes, got {}",
                IV_LENGTH,
                iv_bytes.len()
            )));
        }

        let ciphertext_bytes = STANDARD
            .decode(ciphertext)
            .map_err(|e| DomainError::crypto(format!("Ciphertext is not valid base64: {}", e)))?;

        let iv_array: [u8; IV_LENGTH] = iv_bytes
            .try_into()
            .expect("length checked above");

        let plaintext = Aes256CbcDec::new(&(*self.key).into(), &iv_array.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext_bytes)
            .map_err(|_| DomainError::crypto("Decryption failed: invalid padding"))?;

        String::from_utf8(plaintext)
            .map_err(|_| DomainError::crypto("Decrypted value is not valid UTF-8"))
    }
}
