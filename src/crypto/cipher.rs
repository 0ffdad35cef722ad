//! AES-256-GCM authenticated encryption of secret fields.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce, so the
//! resulting blob is self-describing and can be decrypted without any
//! external context.  A leading format byte lets a future layout change
//! be detected instead of being fed to the cipher.
//!
//! Layout of the returned byte buffer:
//!   [ 1-byte format version | 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{Result, VaultError};

/// Current ciphertext envelope version.
const FORMAT_VERSION: u8 = 1;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the versioned envelope (version || nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce per call — never reused for the same key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    output.push(FORMAT_VERSION);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt an envelope produced by `encrypt`.
///
/// Fails closed: truncated input, an unknown version byte, a wrong key,
/// or any tampering with the ciphertext or tag all yield
/// `DecryptionFailed`.  Partial plaintext is never returned.
pub fn decrypt(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>> {
    // Smallest valid envelope: version + nonce + tag of an empty message.
    if envelope.len() < 1 + NONCE_LEN + TAG_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    if envelope[0] != FORMAT_VERSION {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = envelope[1..].split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)?;

    Ok(plaintext)
}
