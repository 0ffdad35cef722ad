//! Credential record types stored in the vault.
//!
//! `CredentialRecord` is the full persisted row: identity fields in
//! plaintext, the secret as an encrypted envelope, and the hash
//! material for verification workflows.  `RecordSummary` is the listing
//! view handed to presentation layers — it never carries ciphertext.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Category applied when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single credential as persisted in the store.
///
/// The pair (`site`, `account`) is the record's identity and is unique
/// within a vault (exact, case-sensitive match).
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Site identity as entered by the user, trimmed but not otherwise
    /// normalized.
    pub site: String,

    /// Account identity (email or username).
    pub account: String,

    /// Encrypted secret envelope (version || nonce || ciphertext).
    pub secret: Vec<u8>,

    /// PBKDF2 digest of the password, base64.
    pub hash_digest: String,

    /// Salt used for the digest, base64.
    pub hash_salt: String,

    pub category: String,

    /// Set on insert, replaced on every update of the pair.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight view of a record (no secret material).
///
/// Returned by search/list operations and serialized for `--json`
/// output.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub site: String,
    pub account: String,
    pub category: String,
    pub updated_at: DateTime<Utc>,
}
