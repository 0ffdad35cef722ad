//! `credvault list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let records = vault.list_all()?;

    if json {
        let rendered = serde_json::to_string_pretty(&records)
            .map_err(|e| VaultError::CommandFailed(format!("JSON encoding: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    output::info(&format!("{} credential(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}
