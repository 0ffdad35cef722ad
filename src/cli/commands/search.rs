//! `credvault search` — find credentials by website substring.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `search` command.
pub fn execute(cli: &Cli, term: &str, json: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let records = vault.search(term)?;

    if json {
        let rendered = serde_json::to_string_pretty(&records)
            .map_err(|e| VaultError::CommandFailed(format!("JSON encoding: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    output::info(&format!("{} result(s) for '{term}'", records.len()));
    output::print_records_table(&records);

    Ok(())
}
