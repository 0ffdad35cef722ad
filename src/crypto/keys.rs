//! In-memory master key wrapper and sub-key derivation.
//!
//! The raw artifact bytes never feed the cipher directly.  HKDF-SHA256
//! (RFC 5869) with a fixed context string derives the AES key, so other
//! sub-keys can be added later under their own `info` namespace without
//! any key reuse.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Length of derived sub-keys (256 bits).
const KEY_LEN: usize = 32;

/// Context string binding the cipher sub-key to its purpose.
const CIPHER_INFO: &[u8] = b"credvault-cipher-key:v1";

/// A wrapper around the 32-byte master key that zeroes its memory when
/// dropped.  Loaded exactly once per process and shared read-only; no
/// component mutates or replaces it after initialization.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw artifact bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Derive the symmetric key used by the cipher engine.
    pub fn cipher_key(&self) -> Result<[u8; KEY_LEN]> {
        hkdf_derive(&self.bytes, CIPHER_INFO)
    }
}

/// Run HKDF-SHA256 expand with the given `info`.
///
/// The extract step is skipped and the master key used directly as the
/// pseudo-random key, because the artifact already has full entropy (it
/// came straight from the OS RNG).
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_key_is_deterministic() {
        let mk = MasterKey::new([0x42u8; 32]);
        assert_eq!(mk.cipher_key().unwrap(), mk.cipher_key().unwrap());
    }

    #[test]
    fn cipher_key_differs_from_artifact_bytes() {
        let raw = [0x42u8; 32];
        let mk = MasterKey::new(raw);
        assert_ne!(mk.cipher_key().unwrap(), raw);
    }

    #[test]
    fn different_artifacts_produce_different_cipher_keys() {
        let a = MasterKey::new([0x01u8; 32]);
        let b = MasterKey::new([0x02u8; 32]);
        assert_ne!(a.cipher_key().unwrap(), b.cipher_key().unwrap());
    }
}
