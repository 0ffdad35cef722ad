//! `credvault add` — save a credential, resolving duplicates if needed.

use std::io::{self, IsTerminal};

use crate::cli::output;
use crate::cli::{open_vault, prompt_resolution, read_secret_value, Cli, OnDuplicate};
use crate::errors::Result;
use crate::vault::duplicates::{Resolution, SaveOutcome};
use crate::vault::SaveRequest;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    site: &str,
    account: &str,
    password: Option<&str>,
    category: Option<&str>,
    on_duplicate: Option<OnDuplicate>,
) -> Result<()> {
    let vault = open_vault(cli)?;

    let password = read_secret_value(&format!("Enter password for {site}"), password)?;

    // Classify the identity first so the user decides with the conflict
    // in front of them.  The save itself re-checks under its own lock.
    let check = vault.check_duplicates(site, account);

    let resolution = if check.is_exact_conflict() {
        match on_duplicate {
            Some(choice) => choice.into(),
            None if io::stdin().is_terminal() => prompt_resolution(&check)?,
            None => {
                output::warning(
                    "Exact duplicate found and no --on-duplicate given — cancelling.",
                );
                Resolution::Cancel
            }
        }
    } else {
        // No conflict: the resolution is never consulted.
        Resolution::Cancel
    };

    let request = SaveRequest {
        site: site.to_string(),
        account: account.to_string(),
        password: password.to_string(),
        category: category.map(str::to_string),
    };

    let report = vault.save(&request, resolution)?;

    output::print_near_matches(&report.near);

    match report.outcome {
        SaveOutcome::Saved => {
            output::success(&format!(
                "Credential saved for {} ({} total)",
                report.site,
                vault.count()?
            ));
        }
        SaveOutcome::Updated => {
            output::success(&format!("Credential updated for {}", report.site));
        }
        SaveOutcome::Cancelled => {
            output::info("Cancelled — nothing was saved.");
        }
    }

    Ok(())
}
