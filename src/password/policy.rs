//! Password generation under a configurable character-class policy.
//!
//! A `PasswordPolicy` is built per request and never persisted.  The
//! generator guarantees at least one character from every enabled class
//! (not just a statistical likelihood), fills the rest uniformly from
//! the union alphabet, and shuffles so the guaranteed characters do not
//! sit at predictable positions.  All randomness comes from the OS
//! CSPRNG — generated passwords are security-sensitive artifacts.

use rand::rngs::OsRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::TryRngCore;

use crate::errors::{Result, VaultError};

/// Minimum allowed password length.
pub const MIN_LENGTH: usize = 8;

/// Maximum allowed password length.
pub const MAX_LENGTH: usize = 50;

/// Default symbol alphabet.
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Default digit alphabet.
pub const DEFAULT_DIGITS: &str = "0123456789";

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Character-class policy for one generation request.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Target length, bounded to `MIN_LENGTH..=MAX_LENGTH`.
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Replacement digit alphabet; `None` uses `DEFAULT_DIGITS`.
    pub digit_alphabet: Option<String>,
    /// Replacement symbol alphabet; `None` uses `DEFAULT_SYMBOLS`.
    pub symbol_alphabet: Option<String>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            digit_alphabet: None,
            symbol_alphabet: None,
        }
    }
}

impl PasswordPolicy {
    /// The enabled class alphabets, in a fixed order.
    fn class_alphabets(&self) -> Vec<Vec<char>> {
        let mut classes = Vec::new();
        if self.lowercase {
            classes.push(LOWERCASE.chars().collect());
        }
        if self.uppercase {
            classes.push(UPPERCASE.chars().collect());
        }
        if self.digits {
            let digits = self.digit_alphabet.as_deref().unwrap_or(DEFAULT_DIGITS);
            classes.push(digits.chars().collect());
        }
        if self.symbols {
            let symbols = self.symbol_alphabet.as_deref().unwrap_or(DEFAULT_SYMBOLS);
            classes.push(symbols.chars().collect());
        }
        classes
    }
}

/// Generate a password satisfying `policy`.
pub fn generate(policy: &PasswordPolicy) -> Result<String> {
    if policy.length < MIN_LENGTH || policy.length > MAX_LENGTH {
        return Err(VaultError::InvalidPolicy(format!(
            "length must be between {MIN_LENGTH} and {MAX_LENGTH} characters, got {}",
            policy.length
        )));
    }

    let classes = policy.class_alphabets();
    if classes.is_empty() {
        return Err(VaultError::InvalidPolicy(
            "at least one character class must be enabled".into(),
        ));
    }
    if classes.iter().any(Vec::is_empty) {
        return Err(VaultError::InvalidPolicy(
            "an enabled character class has an empty alphabet".into(),
        ));
    }

    let union: Vec<char> = classes.iter().flatten().copied().collect();
    let mut rng = OsRng.unwrap_err();

    // One guaranteed character per enabled class.
    let mut chars: Vec<char> = Vec::with_capacity(policy.length);
    for class in &classes {
        if let Some(c) = class.choose(&mut rng) {
            chars.push(*c);
        }
    }

    // Fill the remaining slots uniformly from the union alphabet.
    while chars.len() < policy.length {
        if let Some(c) = union.choose(&mut rng) {
            chars.push(*c);
        }
    }

    // Shuffle so the guaranteed characters are not predictably placed.
    chars.shuffle(&mut rng);

    Ok(chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        for length in [MIN_LENGTH, 16, 32, MAX_LENGTH] {
            let policy = PasswordPolicy {
                length,
                ..PasswordPolicy::default()
            };
            assert_eq!(generate(&policy).unwrap().chars().count(), length);
        }
    }

    #[test]
    fn every_enabled_class_is_represented() {
        let policy = PasswordPolicy {
            length: 8,
            ..PasswordPolicy::default()
        };

        // Even at minimum length every class must show up, every time.
        for _ in 0..50 {
            let pw = generate(&policy).unwrap();
            assert!(pw.chars().any(|c| c.is_ascii_lowercase()), "no lowercase in {pw:?}");
            assert!(pw.chars().any(|c| c.is_ascii_uppercase()), "no uppercase in {pw:?}");
            assert!(pw.chars().any(|c| c.is_ascii_digit()), "no digit in {pw:?}");
            assert!(
                pw.chars().any(|c| DEFAULT_SYMBOLS.contains(c)),
                "no symbol in {pw:?}"
            );
        }
    }

    #[test]
    fn disabled_classes_never_appear() {
        let policy = PasswordPolicy {
            length: 20,
            lowercase: true,
            uppercase: false,
            digits: false,
            symbols: false,
            ..PasswordPolicy::default()
        };

        for _ in 0..20 {
            let pw = generate(&policy).unwrap();
            assert!(pw.chars().all(|c| c.is_ascii_lowercase()), "stray class in {pw:?}");
        }
    }

    #[test]
    fn length_out_of_bounds_is_invalid_policy() {
        for length in [0, MIN_LENGTH - 1, MAX_LENGTH + 1] {
            let policy = PasswordPolicy {
                length,
                ..PasswordPolicy::default()
            };
            assert!(matches!(
                generate(&policy),
                Err(VaultError::InvalidPolicy(_))
            ));
        }
    }

    #[test]
    fn no_enabled_class_is_invalid_policy() {
        let policy = PasswordPolicy {
            length: 12,
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
            ..PasswordPolicy::default()
        };
        assert!(matches!(generate(&policy), Err(VaultError::InvalidPolicy(_))));
    }

    #[test]
    fn empty_override_alphabet_is_invalid_policy() {
        let policy = PasswordPolicy {
            length: 12,
            symbol_alphabet: Some(String::new()),
            ..PasswordPolicy::default()
        };
        assert!(matches!(generate(&policy), Err(VaultError::InvalidPolicy(_))));
    }

    #[test]
    fn custom_alphabets_are_honored() {
        let policy = PasswordPolicy {
            length: 30,
            lowercase: false,
            uppercase: false,
            digits: true,
            symbols: true,
            digit_alphabet: Some("01".into()),
            symbol_alphabet: Some("#".into()),
        };

        let pw = generate(&policy).unwrap();
        assert!(pw.chars().all(|c| c == '0' || c == '1' || c == '#'));
        assert!(pw.contains('#'));
    }

    #[test]
    fn successive_passwords_differ() {
        let policy = PasswordPolicy::default();
        let a = generate(&policy).unwrap();
        let b = generate(&policy).unwrap();
        // 16 chars over a ~90-symbol alphabet: a collision means the RNG
        // is broken, not that we got unlucky.
        assert_ne!(a, b);
    }
}
