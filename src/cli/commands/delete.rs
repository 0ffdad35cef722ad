//! `credvault delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, site: &str, account: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the credential for {site} ({account})?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let vault = open_vault(cli)?;

    if vault.delete(site, account)? {
        output::success(&format!("Deleted credential for {site} ({account})"));
    } else {
        output::info(&format!("No credential stored for {site} ({account})"));
    }

    Ok(())
}
