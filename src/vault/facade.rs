//! The vault façade — the one boundary object presentation layers call.
//!
//! `Vault` composes the key manager, cipher engine, credential hasher,
//! record store, and audit log.  Plaintext secrets exist only inside a
//! single façade operation: the store below this layer only ever sees
//! ciphertext, and the cipher never touches the database.

use std::fs;
use std::path::Path;

use zeroize::Zeroize;

use crate::audit::AuditLog;
use crate::config::Settings;
use crate::crypto::{cipher, hasher, keyfile, MasterKey};
use crate::errors::{Result, VaultError};
use crate::password::{self, PasswordPolicy, StrengthAssessment};
use crate::vault::duplicates::{DuplicateCheck, Resolution, SaveOutcome, SaveReport};
use crate::vault::record::{CredentialRecord, RecordSummary};
use crate::vault::store::VaultStore;

/// File name of the master key artifact inside the vault directory.
pub const KEY_FILE: &str = "master.key";

/// File name of the record store inside the vault directory.
pub const STORE_FILE: &str = "credentials.db";

/// One credential save as requested by the caller.
///
/// Deliberately not `Debug` — the plaintext password must never land
/// in log or panic output.
#[derive(Clone)]
pub struct SaveRequest {
    pub site: String,
    pub account: String,
    pub password: String,
    /// Falls back to the configured default category when empty.
    pub category: Option<String>,
}

/// The vault engine handle.  Create one with `Vault::open`, then drive
/// it with the operation methods.
pub struct Vault {
    store: VaultStore,
    key: MasterKey,
    audit: Option<AuditLog>,
    hash_iterations: u32,
    default_category: String,
}

impl Vault {
    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    /// Initialize the vault at `dir`: load or create the master key,
    /// open the record store, and attach the audit log.
    ///
    /// Key and storage failures abort startup; they are never papered
    /// over with a fresh key or an empty store.
    pub fn open(dir: &Path, settings: &Settings) -> Result<Self> {
        fs::create_dir_all(dir)?;

        let key_path = dir.join(KEY_FILE);
        let first_run = !keyfile::key_exists(&key_path);
        let key = keyfile::ensure_key(&key_path)?;

        let store = VaultStore::open(&dir.join(STORE_FILE), settings.near_match()?)?;
        let audit = AuditLog::open(dir);

        let vault = Self {
            store,
            key,
            audit,
            hash_iterations: settings.hash_iterations,
            default_category: settings.default_category.clone(),
        };

        if first_run {
            vault.log("init", None, None, Some("vault created"));
        }

        Ok(vault)
    }

    // ------------------------------------------------------------------
    // Password engine delegation
    // ------------------------------------------------------------------

    /// Generate a password under `policy`.
    pub fn generate_password(&self, policy: &PasswordPolicy) -> Result<String> {
        password::generate(policy)
    }

    /// Score a candidate password.
    pub fn assess_strength(&self, candidate: &str) -> StrengthAssessment {
        password::assess_strength(candidate)
    }

    // ------------------------------------------------------------------
    // Duplicate classification
    // ------------------------------------------------------------------

    /// Classify an identity pair before a save.
    ///
    /// Degrades to an empty check when the lookup itself fails — the
    /// advisory query must never block a save; uniqueness is still
    /// enforced by the locked check inside `save`.
    pub fn check_duplicates(&self, site: &str, account: &str) -> DuplicateCheck {
        self.store
            .find_duplicates(site.trim(), account.trim())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Save a credential, applying `resolution` if the identity pair
    /// collides with a stored record.
    ///
    /// The near matches observed during the save are reported back for
    /// user awareness; they never block.
    pub fn save(&self, request: &SaveRequest, resolution: Resolution) -> Result<SaveReport> {
        let site = request.site.trim();
        let account = request.account.trim();

        if site.is_empty() {
            return Err(VaultError::Validation("website is required".into()));
        }
        if account.is_empty() {
            return Err(VaultError::Validation("email or username is required".into()));
        }
        if request.password.trim().is_empty() {
            return Err(VaultError::Validation("password is required".into()));
        }

        let category = request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_category)
            .to_string();

        // Encrypt the secret and hash it for verification workflows.
        // The derived cipher key lives only for this call.
        let mut cipher_key = self.key.cipher_key()?;
        let secret = cipher::encrypt(&cipher_key, request.password.as_bytes());
        cipher_key.zeroize();
        let secret = secret?;

        let (hash_digest, hash_salt) =
            hasher::hash_with_iterations(&request.password, self.hash_iterations)?;

        let record = CredentialRecord {
            site: site.to_string(),
            account: account.to_string(),
            secret,
            hash_digest,
            hash_salt,
            category,
            updated_at: chrono::Utc::now(),
        };

        // Advisory near matches, gathered before the write.
        let near = self.check_duplicates(site, account).near;

        let (outcome, final_site) = self.store.save_resolved(&record, resolution)?;

        match outcome {
            SaveOutcome::Saved => self.log("save", Some(&final_site), Some(account), Some("inserted")),
            SaveOutcome::Updated => {
                self.log("update", Some(&final_site), Some(account), Some("overwritten"))
            }
            SaveOutcome::Cancelled => {}
        }

        Ok(SaveReport {
            outcome,
            site: final_site,
            near,
        })
    }

    /// Case-insensitive substring search on site identities.
    pub fn search(&self, term: &str) -> Result<Vec<RecordSummary>> {
        self.store.search(term.trim())
    }

    /// All records, ordered by site identity.
    pub fn list_all(&self) -> Result<Vec<RecordSummary>> {
        self.store.list_all()
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        self.store.count()
    }

    /// Decrypt and return the stored password for an identity pair.
    pub fn reveal(&self, site: &str, account: &str) -> Result<String> {
        let site = site.trim();
        let account = account.trim();

        let record = self
            .store
            .get(site, account)?
            .ok_or_else(|| VaultError::RecordNotFound {
                site: site.to_string(),
                account: account.to_string(),
            })?;

        let mut cipher_key = self.key.cipher_key()?;
        let plaintext = cipher::decrypt(&cipher_key, &record.secret);
        cipher_key.zeroize();
        let plaintext = plaintext?;

        self.log("reveal", Some(site), Some(account), None);

        // Take ownership without copying; wipe the bytes if they turn
        // out not to be valid UTF-8.
        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::DecryptionFailed
        })
    }

    /// Verify a candidate password against a stored record's hash
    /// material without decrypting the secret.
    pub fn verify_candidate(&self, site: &str, account: &str, candidate: &str) -> Result<bool> {
        let site = site.trim();
        let account = account.trim();

        let record = self
            .store
            .get(site, account)?
            .ok_or_else(|| VaultError::RecordNotFound {
                site: site.to_string(),
                account: account.to_string(),
            })?;

        Ok(hasher::verify_with_iterations(
            candidate,
            &record.hash_digest,
            &record.hash_salt,
            self.hash_iterations,
        ))
    }

    /// Delete the record for an identity pair.  Returns whether a
    /// deletion occurred.
    pub fn delete(&self, site: &str, account: &str) -> Result<bool> {
        let site = site.trim();
        let account = account.trim();

        let deleted = self.store.delete(site, account)?;
        if deleted {
            self.log("delete", Some(site), Some(account), None);
        }
        Ok(deleted)
    }

    fn log(&self, op: &str, site: Option<&str>, account: Option<&str>, details: Option<&str>) {
        if let Some(audit) = &self.audit {
            audit.log(op, site, account, details);
        }
    }
}
