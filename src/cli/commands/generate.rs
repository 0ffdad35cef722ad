//! `credvault generate` — generate a random password.

use crate::cli::output;
use crate::errors::Result;
use crate::password::{self, PasswordPolicy};

/// Execute the `generate` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    length: usize,
    no_lowercase: bool,
    no_uppercase: bool,
    no_digits: bool,
    no_symbols: bool,
    digits: Option<&str>,
    symbols: Option<&str>,
    check: bool,
) -> Result<()> {
    let policy = PasswordPolicy {
        length,
        lowercase: !no_lowercase,
        uppercase: !no_uppercase,
        digits: !no_digits,
        symbols: !no_symbols,
        digit_alphabet: digits.map(str::to_string),
        symbol_alphabet: symbols.map(str::to_string),
    };

    let password = password::generate(&policy)?;

    // Bare value on stdout so it can be piped straight into `add`.
    println!("{password}");

    if check {
        output::print_strength(&password::assess_strength(&password));
    }

    Ok(())
}
