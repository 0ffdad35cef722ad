//! `credvault audit` — display the audit log.
//!
//! Usage:
//!   credvault audit               # show last 50 entries
//!   credvault audit --last 20     # show last 20
//!   credvault audit --since 7d    # entries from last 7 days

use chrono::Utc;
use comfy_table::{ContentArrangement, Table};

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{vault_dir, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = vault_dir(cli, &settings)?;

    let audit = AuditLog::open(&dir)
        .ok_or_else(|| VaultError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(VaultError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        VaultError::CommandFailed(format!(
            "invalid duration '{input}' — number part is not valid"
        ))
    })?;

    let duration = match unit {
        'd' => chrono::Duration::days(num),
        'h' => chrono::Duration::hours(num),
        'm' => chrono::Duration::minutes(num),
        _ => unreachable!(),
    };

    Ok(Utc::now() - duration)
}

fn print_audit_table(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Website", "Account", "Details"]);

    for e in entries {
        table.add_row(vec![
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.operation.clone(),
            e.site.clone().unwrap_or_default(),
            e.account.clone().unwrap_or_default(),
            e.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
}
