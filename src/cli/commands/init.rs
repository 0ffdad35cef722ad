//! `credvault init` — create the vault directory, master key, and record store.

use crate::cli::output;
use crate::cli::{vault_dir, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault::facade::KEY_FILE;
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = vault_dir(cli, &settings)?;

    let already_initialized = dir.join(KEY_FILE).exists();

    // Opening performs the actual work: key generation on first run,
    // store and audit-log creation.
    let vault = Vault::open(&dir, &settings)?;

    if already_initialized {
        output::info(&format!(
            "Vault already initialized at {} ({} credential(s))",
            dir.display(),
            vault.count()?
        ));
        output::tip("Run `credvault add <site> <account>` to save a credential.");
        return Ok(());
    }

    output::success(&format!("Vault initialized at {}", dir.display()));
    output::info("A new master key was generated — back it up somewhere safe.");
    output::tip("Run `credvault add <site> <account>` to save your first credential.");

    Ok(())
}
