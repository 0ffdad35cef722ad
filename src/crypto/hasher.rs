//! One-way credential hashing with PBKDF2-HMAC-SHA256.
//!
//! Used by the strength/verification workflow only — stored secrets are
//! recovered through the cipher engine, never from a hash.  Each call to
//! `hash` draws a fresh random 32-byte salt; the iteration count is a
//! tunable constant high enough to resist offline brute force.
//!
//! Digest and salt travel as base64 strings so they can sit in TEXT
//! columns next to the record they belong to.

use hmac::Hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{Result, VaultError};

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Length of the random salt in bytes (256 bits).
const SALT_LEN: usize = 32;

/// Length of the derived digest in bytes (256 bits).
const DIGEST_LEN: usize = 32;

/// Hash `password` under a fresh random salt with the default iteration
/// count.  Returns `(digest, salt)`, both base64-encoded.
pub fn hash(password: &str) -> Result<(String, String)> {
    hash_with_iterations(password, DEFAULT_ITERATIONS)
}

/// Hash `password` with an explicit iteration count.
pub fn hash_with_iterations(password: &str, iterations: u32) -> Result<(String, String)> {
    if iterations == 0 {
        return Err(VaultError::HashingFailed(
            "iteration count must be at least 1".into(),
        ));
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| VaultError::HashingFailed(format!("system RNG failure: {e}")))?;

    let digest = derive(password, &salt, iterations)?;

    Ok((BASE64.encode(digest), BASE64.encode(salt)))
}

/// Verify `password` against a stored base64 digest and salt, using the
/// default iteration count.
pub fn verify(password: &str, digest: &str, salt: &str) -> bool {
    verify_with_iterations(password, digest, salt, DEFAULT_ITERATIONS)
}

/// Verify with an explicit iteration count.
///
/// Malformed stored material (bad base64, wrong digest length) counts as
/// a mismatch rather than an error — the caller only ever needs a
/// yes/no.  The comparison is constant-time.
pub fn verify_with_iterations(password: &str, digest: &str, salt: &str, iterations: u32) -> bool {
    let Ok(stored_digest) = BASE64.decode(digest) else {
        return false;
    };
    let Ok(salt_bytes) = BASE64.decode(salt) else {
        return false;
    };

    let Ok(candidate) = derive(password, &salt_bytes, iterations) else {
        return false;
    };

    candidate.as_slice().ct_eq(&stored_digest).into()
}

/// Run PBKDF2-HMAC-SHA256 over `password` with the given salt.
fn derive(password: &str, salt: &[u8], iterations: u32) -> Result<[u8; DIGEST_LEN]> {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, &mut digest)
        .map_err(|e| VaultError::HashingFailed(format!("PBKDF2 failed: {e}")))?;
    Ok(digest)
}
