//! `credvault strength` — assess the strength of a password.

use crate::cli::output;
use crate::cli::read_secret_value;
use crate::errors::Result;
use crate::password;

/// Execute the `strength` command.
pub fn execute(candidate: Option<&str>) -> Result<()> {
    let value = read_secret_value("Enter password to assess", candidate)?;

    let assessment = password::assess_strength(&value);
    output::print_strength(&assessment);

    Ok(())
}
