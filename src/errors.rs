use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    // --- Key artifact errors ---
    #[error("Master key unavailable: {0}")]
    KeyUnavailable(String),

    // --- Password policy errors ---
    #[error("Invalid password policy: {0}")]
    InvalidPolicy(String),

    // --- Store errors ---
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("No credential stored for '{site}' / '{account}'")]
    RecordNotFound { site: String, account: String },

    // --- Validation errors ---
    #[error("{0}")]
    Validation(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

impl From<rusqlite::Error> for VaultError {
    /// Every SQLite failure maps to `StorageUnavailable` so callers can
    /// tell "cannot read the store" apart from "the store is empty".
    fn from(e: rusqlite::Error) -> Self {
        VaultError::StorageUnavailable(e.to_string())
    }
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
