//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::duplicates::{DuplicateCheck, Resolution};
use crate::vault::Vault;

/// CredVault CLI: encrypted credential vault.
#[derive(Parser)]
#[command(name = "credvault", about = "Encrypted credential vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: from .credvault.toml, else .credvault)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault (creates the master key and record store)
    Init,

    /// Save a credential (add or update)
    Add {
        /// Website the credential belongs to
        site: String,
        /// Email or username
        account: String,
        /// Password value (omit for interactive prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Category label (default from config, usually "General")
        #[arg(short, long)]
        category: Option<String>,
        /// What to do when the exact identity already exists
        #[arg(long, value_enum)]
        on_duplicate: Option<OnDuplicate>,
    },

    /// List all credentials
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search credentials by website substring
    Search {
        /// Search term (case-insensitive)
        term: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Reveal a stored password
    Show {
        site: String,
        account: String,
        /// Copy the password to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Delete a credential
    Delete {
        site: String,
        account: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        /// Password length (8-50)
        #[arg(short, long, default_value_t = 16)]
        length: usize,
        /// Exclude lowercase letters
        #[arg(long)]
        no_lowercase: bool,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
        /// Custom digit alphabet
        #[arg(long)]
        digits: Option<String>,
        /// Custom symbol alphabet
        #[arg(long)]
        symbols: Option<String>,
        /// Also print a strength assessment to stderr
        #[arg(long)]
        check: bool,
    },

    /// Assess the strength of a password
    Strength {
        /// Candidate password (omit to read from stdin or prompt)
        password: Option<String>,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Non-interactive duplicate resolution, for scripts and pipelines.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OnDuplicate {
    /// Replace the existing record in place
    Overwrite,
    /// Save under a fresh "site (n)" identity
    New,
    /// Abort the save
    Cancel,
}

impl From<OnDuplicate> for Resolution {
    fn from(choice: OnDuplicate) -> Self {
        match choice {
            OnDuplicate::Overwrite => Resolution::Overwrite,
            OnDuplicate::New => Resolution::CreateNew,
            OnDuplicate::Cancel => Resolution::Cancel,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory: `--vault-dir` wins over the config file.
pub fn vault_dir(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault_dir {
        Some(dir) => cwd.join(dir),
        None => settings.vault_path(&cwd),
    })
}

/// Load settings and open the vault engine.
pub fn open_vault(cli: &Cli) -> Result<Vault> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = vault_dir(cli, &settings)?;
    Vault::open(&dir, &settings)
}

/// Get a secret value, trying in order:
/// 1. Inline flag value (shell-history warning)
/// 2. Piped stdin
/// 3. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_secret_value(prompt: &str, inline: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Ask the user how to resolve an exact-identity conflict.
pub fn prompt_resolution(check: &DuplicateCheck) -> Result<Resolution> {
    if let Some(exact) = &check.exact {
        output::warning(&format!(
            "An entry already exists for {} ({}) in category '{}'.",
            exact.site, exact.account, exact.category
        ));
    }
    output::print_near_matches(&check.near);

    let choice = dialoguer::Select::new()
        .with_prompt("What would you like to do?")
        .items(&["Overwrite existing", "Create new entry", "Cancel"])
        .default(2)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("selection prompt: {e}")))?;

    Ok(match choice {
        0 => Resolution::Overwrite,
        1 => Resolution::CreateNew,
        _ => Resolution::Cancel,
    })
}
