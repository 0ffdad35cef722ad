//! Master key artifact lifecycle.
//!
//! The master key is 32 random bytes persisted as a single file,
//! readable only by the owning user.  `ensure_key` is the one entry
//! point: it generates the artifact on first use and loads it on every
//! run after that.
//!
//! An existing artifact is NEVER regenerated.  Replacing the key would
//! make every previously encrypted record permanently undecryptable, so
//! a present-but-unreadable or malformed artifact is a hard
//! `KeyUnavailable` error, not a trigger for a fresh key.

use std::fs;
use std::path::Path;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// Length of the master key artifact in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Load the master key artifact at `path`, generating it first if absent.
pub fn ensure_key(path: &Path) -> Result<MasterKey> {
    if path.exists() {
        load_key(path)
    } else {
        generate_key(path)
    }
}

/// Returns `true` if a key artifact already exists at `path`.
pub fn key_exists(path: &Path) -> bool {
    path.exists()
}

/// Generate a new random key artifact and write it to `path`.
fn generate_key(path: &Path) -> Result<MasterKey> {
    let mut key = [0u8; KEY_LEN];
    OsRng
        .try_fill_bytes(&mut key)
        .map_err(|e| VaultError::KeyUnavailable(format!("system RNG failure: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::KeyUnavailable(format!("cannot create key directory: {e}"))
            })?;
        }
    }

    fs::write(path, key)
        .map_err(|e| VaultError::KeyUnavailable(format!("failed to write key artifact: {e}")))?;

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            VaultError::KeyUnavailable(format!("failed to set key artifact permissions: {e}"))
        })?;
    }

    Ok(MasterKey::new(key))
}

/// Load an existing key artifact and validate its length.
fn load_key(path: &Path) -> Result<MasterKey> {
    let data = fs::read(path)
        .map_err(|e| VaultError::KeyUnavailable(format!("failed to read key artifact: {e}")))?;

    let bytes: [u8; KEY_LEN] = data.as_slice().try_into().map_err(|_| {
        VaultError::KeyUnavailable(format!(
            "key artifact must be exactly {KEY_LEN} bytes, got {}",
            data.len()
        ))
    })?;

    Ok(MasterKey::new(bytes))
}
