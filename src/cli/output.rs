//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::password::StrengthAssessment;
use crate::vault::RecordSummary;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credential summaries (Website, Account, Category, Updated).
pub fn print_records_table(records: &[RecordSummary]) {
    if records.is_empty() {
        info("No credentials stored yet.");
        tip("Run `credvault add <site> <account>` to save your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Website", "Account", "Category", "Updated"]);

    for r in records {
        table.add_row(vec![
            r.site.clone(),
            r.account.clone(),
            r.category.clone(),
            r.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a strength assessment with its severity color mapped to the
/// nearest terminal style.
pub fn print_strength(assessment: &StrengthAssessment) {
    use crate::password::StrengthLevel::*;

    let label = assessment.level.label();
    let styled = match assessment.level {
        VeryWeak | Weak => style(label).red().bold(),
        Fair | Good => style(label).yellow().bold(),
        Strong | VeryStrong | Excellent => style(label).green().bold(),
        Unknown => style(label).dim(),
    };

    println!("{styled} (score {}/7)", assessment.score);
}

/// Print the advisory list of near-duplicate records.
pub fn print_near_matches(near: &[RecordSummary]) {
    if near.is_empty() {
        return;
    }

    warning("Similar entries already exist:");
    for r in near {
        eprintln!("  - {} ({})", r.site, r.account);
    }
}
