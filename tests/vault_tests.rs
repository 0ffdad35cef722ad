//! Integration tests for the vault store and façade.

use credvault::config::Settings;
use credvault::errors::VaultError;
use credvault::vault::{
    facade::STORE_FILE, NearMatchScope, Resolution, SaveOutcome, SaveRequest, Vault, VaultStore,
};

use tempfile::TempDir;

/// Settings with a fast hash so the suite doesn't spend seconds in
/// PBKDF2 per save.
fn test_settings() -> Settings {
    Settings {
        hash_iterations: 1_000,
        ..Settings::default()
    }
}

fn open_vault(dir: &TempDir) -> Vault {
    Vault::open(dir.path(), &test_settings()).expect("open vault")
}

fn request(site: &str, account: &str, password: &str, category: Option<&str>) -> SaveRequest {
    SaveRequest {
        site: site.to_string(),
        account: account.to_string(),
        password: password.to_string(),
        category: category.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_roundtrip() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    // Fresh vault is empty.
    assert!(vault.list_all().unwrap().is_empty());

    // Save one credential.
    let report = vault
        .save(
            &request("bank.com", "alice", "Tr0ub4dor&3", Some("Banking")),
            Resolution::Cancel,
        )
        .unwrap();
    assert_eq!(report.outcome, SaveOutcome::Saved);

    // It lists with its category.
    let all = vault.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].site, "bank.com");
    assert_eq!(all[0].category, "Banking");

    // Reveal recovers the plaintext.
    assert_eq!(vault.reveal("bank.com", "alice").unwrap(), "Tr0ub4dor&3");

    // Delete reports true, and the vault is empty again.
    assert!(vault.delete("bank.com", "alice").unwrap());
    assert!(vault.list_all().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Uniqueness discipline
// ---------------------------------------------------------------------------

#[test]
fn repeated_save_never_duplicates_an_identity_pair() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    vault
        .save(&request("X", "y", "first", None), Resolution::Cancel)
        .unwrap();

    // Overwrite and CreateNew both keep identity pairs unique.
    vault
        .save(&request("X", "y", "second", None), Resolution::Overwrite)
        .unwrap();
    assert_eq!(vault.count().unwrap(), 1);

    let report = vault
        .save(&request("X", "y", "third", None), Resolution::CreateNew)
        .unwrap();
    assert_eq!(report.site, "X (1)");
    assert_eq!(vault.count().unwrap(), 2);

    // A cancelled save mutates nothing.
    let report = vault
        .save(&request("X", "y", "fourth", None), Resolution::Cancel)
        .unwrap();
    assert_eq!(report.outcome, SaveOutcome::Cancelled);
    assert_eq!(vault.count().unwrap(), 2);
    assert_eq!(vault.reveal("X", "y").unwrap(), "second");
}

#[test]
fn unique_site_skips_existing_suffixes() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);
    vault
        .save(&request("X", "y", "pw", None), Resolution::Cancel)
        .unwrap();
    vault
        .save(&request("X (1)", "y", "pw", None), Resolution::Cancel)
        .unwrap();

    // "X" and "X (1)" are taken, so the rename lands on "X (2)".
    let report = vault
        .save(&request("X", "y", "pw", None), Resolution::CreateNew)
        .unwrap();
    assert_eq!(report.site, "X (2)");
}

// ---------------------------------------------------------------------------
// Duplicate classification
// ---------------------------------------------------------------------------

#[test]
fn exact_match_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    vault
        .save(&request("example.com", "a@b.com", "pw", None), Resolution::Cancel)
        .unwrap();

    let check = vault.check_duplicates("Example.com", "a@b.com");
    let exact = check.exact.expect("should classify as exact");
    assert_eq!(exact.site, "example.com");
    assert!(check.near.is_empty());
}

#[test]
fn overlapping_identity_is_only_a_near_match() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    vault
        .save(&request("example.org", "a@b.com", "pw", None), Resolution::Cancel)
        .unwrap();

    let check = vault.check_duplicates("example.com", "a@b.com");
    assert!(check.exact.is_none());
    assert_eq!(check.near.len(), 1);
    assert_eq!(check.near[0].site, "example.org");
}

#[test]
fn near_matches_are_advisory_and_reported() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    vault
        .save(&request("github.com", "dev@me.io", "pw1", None), Resolution::Cancel)
        .unwrap();

    let report = vault
        .save(&request("github.io", "dev@me.io", "pw2", None), Resolution::Cancel)
        .unwrap();

    // The save went through; the overlap came back as advice.
    assert_eq!(report.outcome, SaveOutcome::Saved);
    assert_eq!(report.near.len(), 1);
    assert_eq!(vault.count().unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Search and listing
// ---------------------------------------------------------------------------

#[test]
fn search_is_substring_and_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    for site in ["GitHub.com", "gitlab.com", "bank.com"] {
        vault
            .save(&request(site, "user", "pw", None), Resolution::Cancel)
            .unwrap();
    }

    assert_eq!(vault.search("GIT").unwrap().len(), 2);
    assert_eq!(vault.search("bank").unwrap().len(), 1);
    assert!(vault.search("missing").unwrap().is_empty());
}

#[test]
fn list_all_is_ordered_by_site() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    for site in ["zoo.org", "alpha.net", "mid.io"] {
        vault
            .save(&request(site, "u", "pw", None), Resolution::Cancel)
            .unwrap();
    }

    let sites: Vec<String> = vault
        .list_all()
        .unwrap()
        .into_iter()
        .map(|r| r.site)
        .collect();
    assert_eq!(sites, vec!["alpha.net", "mid.io", "zoo.org"]);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[test]
fn deleting_missing_pair_returns_false_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir);

    vault
        .save(&request("keep.com", "me", "pw", None), Resolution::Cancel)
        .unwrap();

    assert!(!vault.delete("ghost.com", "nobody").unwrap());
    assert_eq!(vault.count().unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn foreign_key_cannot_decrypt_copied_records() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();

    let vault_a = open_vault(&dir_a);
    vault_a
        .save(&request("bank.com", "alice", "s3cret", None), Resolution::Cancel)
        .unwrap();
    drop(vault_a);

    // Vault B gets its own master key, then A's record store is copied
    // over B's — simulating records encrypted under a different key.
    let _vault_b = open_vault(&dir_b);
    std::fs::copy(
        dir_a.path().join(STORE_FILE),
        dir_b.path().join(STORE_FILE),
    )
    .unwrap();

    let vault_b = open_vault(&dir_b);
    let result = vault_b.reveal("bank.com", "alice");
    assert!(matches!(result, Err(VaultError::DecryptionFailed)));
}

#[test]
fn unreadable_store_is_storage_unavailable_not_empty() {
    // A directory where the database file should be makes SQLite fail
    // to open — that must surface as an error, not as "no records".
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("credentials.db");
    std::fs::create_dir(&bogus).unwrap();

    let result = VaultStore::open(&bogus, NearMatchScope::SiteOrAccount);
    assert!(matches!(result, Err(VaultError::StorageUnavailable(_))));
}

#[test]
fn corrupt_key_artifact_fails_initialization() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("master.key"), b"nope").unwrap();

    let result = Vault::open(dir.path(), &test_settings());
    assert!(matches!(result, Err(VaultError::KeyUnavailable(_))));
}
