//! SQLite-backed credential store.
//!
//! Identity fields are stored in plaintext, the secret as an encrypted
//! envelope — this layer never sees plaintext secrets.  The table
//! carries `UNIQUE(site, account)`; the mutex around the connection is
//! the write-serialization boundary, and `save_resolved` runs the whole
//! check → decide → write sequence under one lock and one transaction
//! so overlapping saves cannot both pass the existence check.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::{Result, VaultError};
use crate::vault::duplicates::{DuplicateCheck, NearMatchScope, Resolution, SaveOutcome};
use crate::vault::record::{CredentialRecord, RecordSummary};

/// Columns of the listing view, shared by several queries.
const SUMMARY_COLS: &str = "site, account, category, updated_at";

/// The credential store handle.
pub struct VaultStore {
    conn: Mutex<Connection>,
    near_scope: NearMatchScope,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the store at `path`.
    pub fn open(path: &Path, near_scope: NearMatchScope) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Restrict the database file to the owning user, like the key
        // artifact next to it.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::from_connection(conn, near_scope)
    }

    /// Open an in-memory store (tests and throwaway sessions).
    pub fn open_in_memory(near_scope: NearMatchScope) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, near_scope)
    }

    fn from_connection(conn: Connection, near_scope: NearMatchScope) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                site        TEXT NOT NULL,
                account     TEXT NOT NULL,
                secret      BLOB NOT NULL,
                hash_digest TEXT NOT NULL,
                hash_salt   TEXT NOT NULL,
                category    TEXT NOT NULL DEFAULT 'General',
                updated_at  TEXT NOT NULL,
                UNIQUE(site, account)
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            near_scope,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::StorageUnavailable("store lock poisoned".into()))
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Insert `record`, or overwrite the record with the same exact
    /// identity pair in place.  Atomic with respect to the existence
    /// check.
    pub fn save(&self, record: &CredentialRecord) -> Result<SaveOutcome> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let outcome = upsert(&tx, record, &record.site, &record.account)?;
        tx.commit()?;
        Ok(outcome)
    }

    /// Apply a resolved save: classify the incoming identity against
    /// the store and act on `resolution`, all under one lock and one
    /// transaction.
    ///
    /// Returns the outcome and the site identity the record ended up
    /// under (renamed by `CreateNew`).
    pub fn save_resolved(
        &self,
        record: &CredentialRecord,
        resolution: Resolution,
    ) -> Result<(SaveOutcome, String)> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let result = match exact_identity(&tx, &record.site, &record.account)? {
            None => (
                upsert(&tx, record, &record.site, &record.account)?,
                record.site.clone(),
            ),
            Some((site, account)) => match resolution {
                Resolution::Cancel => (SaveOutcome::Cancelled, record.site.clone()),
                // Write to the matched record's stored identity, so an
                // overwrite never inserts a case-variant sibling row.
                Resolution::Overwrite => (upsert(&tx, record, &site, &account)?, site),
                Resolution::CreateNew => {
                    let fresh = unique_site_in(&tx, &record.site)?;
                    let outcome = upsert(&tx, record, &fresh, &record.account)?;
                    (outcome, fresh)
                }
            },
        };

        tx.commit()?;
        Ok(result)
    }

    /// Remove the record with the given identity pair.
    ///
    /// Returns whether a deletion occurred; deleting an absent pair is
    /// not an error.
    pub fn delete(&self, site: &str, account: &str) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "DELETE FROM credentials WHERE site = ?1 AND account = ?2",
            params![site, account],
        )?;
        Ok(changed > 0)
    }

    // ------------------------------------------------------------------
    // Duplicate detection
    // ------------------------------------------------------------------

    /// Classify an identity pair: exact match (case-insensitive
    /// equality on both fields) plus near matches (substring overlap
    /// within the configured scope).
    pub fn find_duplicates(&self, site: &str, account: &str) -> Result<DuplicateCheck> {
        let conn = self.lock()?;

        let site_pattern = contains_pattern(site);
        let candidates = match self.near_scope {
            NearMatchScope::SiteOrAccount => {
                let sql = format!(
                    "SELECT {SUMMARY_COLS} FROM credentials
                     WHERE site LIKE ?1 ESCAPE '\\' OR account LIKE ?2 ESCAPE '\\'"
                );
                query_summaries(&conn, &sql, params![site_pattern, contains_pattern(account)])?
            }
            NearMatchScope::SiteOnly => {
                let sql = format!(
                    "SELECT {SUMMARY_COLS} FROM credentials WHERE site LIKE ?1 ESCAPE '\\'"
                );
                query_summaries(&conn, &sql, params![site_pattern])?
            }
        };

        let mut check = DuplicateCheck::default();
        for summary in candidates {
            let is_exact = summary.site.eq_ignore_ascii_case(site)
                && summary.account.eq_ignore_ascii_case(account);
            if is_exact && check.exact.is_none() {
                check.exact = Some(summary);
            } else {
                check.near.push(summary);
            }
        }

        Ok(check)
    }

    /// First free site identity of the form `base (n)`, probing from
    /// n = 1.
    pub fn unique_site(&self, base: &str) -> Result<String> {
        let conn = self.lock()?;
        unique_site_in(&conn, base)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Case-insensitive substring search on the site identity, in
    /// storage order.
    pub fn search(&self, term: &str) -> Result<Vec<RecordSummary>> {
        let conn = self.lock()?;
        let sql =
            format!("SELECT {SUMMARY_COLS} FROM credentials WHERE site LIKE ?1 ESCAPE '\\'");
        query_summaries(&conn, &sql, params![contains_pattern(term)])
    }

    /// All records, ordered by site identity ascending.
    pub fn list_all(&self) -> Result<Vec<RecordSummary>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SUMMARY_COLS} FROM credentials ORDER BY site ASC");
        query_summaries(&conn, &sql, params![])
    }

    /// Fetch the full record for an exact identity pair.
    pub fn get(&self, site: &str, account: &str) -> Result<Option<CredentialRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT site, account, secret, hash_digest, hash_salt, category, updated_at
                 FROM credentials WHERE site = ?1 AND account = ?2",
                params![site, account],
                |row| {
                    Ok(CredentialRecord {
                        site: row.get(0)?,
                        account: row.get(1)?,
                        secret: row.get(2)?,
                        hash_digest: row.get(3)?,
                        hash_salt: row.get(4)?,
                        category: row.get(5)?,
                        updated_at: parse_timestamp(row.get::<_, String>(6)?),
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

// ---------------------------------------------------------------------------
// Connection-level helpers (shared between locked operations)
// ---------------------------------------------------------------------------

/// Insert or overwrite at the given identity, carrying `record`'s
/// secret, hash material, and category.
fn upsert(
    conn: &Connection,
    record: &CredentialRecord,
    site: &str,
    account: &str,
) -> Result<SaveOutcome> {
    let exists = conn
        .prepare("SELECT 1 FROM credentials WHERE site = ?1 AND account = ?2")?
        .exists(params![site, account])?;

    let timestamp = record.updated_at.to_rfc3339();
    if exists {
        conn.execute(
            "UPDATE credentials
             SET secret = ?1, hash_digest = ?2, hash_salt = ?3, category = ?4, updated_at = ?5
             WHERE site = ?6 AND account = ?7",
            params![
                record.secret,
                record.hash_digest,
                record.hash_salt,
                record.category,
                timestamp,
                site,
                account
            ],
        )?;
        Ok(SaveOutcome::Updated)
    } else {
        conn.execute(
            "INSERT INTO credentials (site, account, secret, hash_digest, hash_salt, category, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                site,
                account,
                record.secret,
                record.hash_digest,
                record.hash_salt,
                record.category,
                timestamp
            ],
        )?;
        Ok(SaveOutcome::Saved)
    }
}

/// Stored-case identity of the record matching case-insensitively, if
/// any.  SQLite's NOCASE collation folds ASCII, which is also what the
/// Rust-side comparisons use.
fn exact_identity(conn: &Connection, site: &str, account: &str) -> Result<Option<(String, String)>> {
    let found = conn
        .query_row(
            "SELECT site, account FROM credentials
             WHERE site = ?1 COLLATE NOCASE AND account = ?2 COLLATE NOCASE
             LIMIT 1",
            params![site, account],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    Ok(found)
}

/// Probe `base (1)`, `base (2)`, … and return the first identity not
/// yet stored.  With N records at most N site names exist, so this
/// terminates within N + 1 probes.
fn unique_site_in(conn: &Connection, base: &str) -> Result<String> {
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{base} ({n})");
        let taken = conn
            .prepare("SELECT 1 FROM credentials WHERE site = ?1")?
            .exists(params![candidate])?;
        if !taken {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn query_summaries<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<RecordSummary>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(RecordSummary {
            site: row.get(0)?,
            account: row.get(1)?,
            category: row.get(2)?,
            updated_at: parse_timestamp(row.get::<_, String>(3)?),
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Build a `%term%` LIKE pattern with `%`, `_`, and `\` escaped so user
/// input cannot act as wildcards.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn parse_timestamp(raw: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
