//! `credvault show` — reveal a stored password.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `show` command.
pub fn execute(cli: &Cli, site: &str, account: &str, copy: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let password = Zeroizing::new(vault.reveal(site, account)?);

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| VaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(password.to_string())
            .map_err(|e| VaultError::CommandFailed(format!("clipboard write: {e}")))?;
        output::success(&format!("Password for {site} copied to clipboard."));
        return Ok(());
    }

    // Bare value on stdout so it can be piped.
    println!("{}", *password);

    Ok(())
}
