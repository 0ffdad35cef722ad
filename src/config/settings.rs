use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::vault::duplicates::NearMatchScope;

/// Project-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the key
    /// artifact, record store, and audit log.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Category applied when a save doesn't specify one.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// PBKDF2 iteration count for credential hashing.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    /// Near-match breadth: "site-or-account" or "site-only".
    #[serde(default = "default_near_match_scope")]
    pub near_match_scope: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".credvault".to_string()
}

fn default_category() -> String {
    crate::vault::DEFAULT_CATEGORY.to_string()
}

fn default_hash_iterations() -> u32 {
    100_000
}

fn default_near_match_scope() -> String {
    "site-or-account".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            default_category: default_category(),
            hash_iterations: default_hash_iterations(),
            near_match_scope: default_near_match_scope(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".credvault.toml";

    /// Load settings from `<project_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the vault directory.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Parse the configured near-match scope.
    pub fn near_match(&self) -> Result<NearMatchScope> {
        self.near_match_scope.parse()
    }
}

// ── Tests ────────────────────────────────────────────────────────────
