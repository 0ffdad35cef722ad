//! Heuristic password strength scoring.
//!
//! One point per length threshold (8, 12, 16) and one per present
//! character class, for a maximum of 7.  The score maps through a fixed
//! table to an ordinal level with a severity color for display.  The
//! contract is determinism and monotonicity — adding length or classes
//! never lowers the score — not cryptographic rigor.

use crate::password::policy::DEFAULT_SYMBOLS;

/// Maximum reachable score.
pub const MAX_SCORE: u8 = 7;

/// Ordinal strength level derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
    Excellent,
    /// Fallback for a score outside the table's domain.
    Unknown,
}

impl StrengthLevel {
    /// Fixed score-to-level table.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLevel::VeryWeak,
            2 => StrengthLevel::Weak,
            3 => StrengthLevel::Fair,
            4 => StrengthLevel::Good,
            5 => StrengthLevel::Strong,
            6 => StrengthLevel::VeryStrong,
            7 => StrengthLevel::Excellent,
            _ => StrengthLevel::Unknown,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
            StrengthLevel::Excellent => "Excellent",
            StrengthLevel::Unknown => "Unknown",
        }
    }

    /// Severity color (hex) for presentation layers.
    pub fn color(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "#f44336",
            StrengthLevel::Weak => "#FF9800",
            StrengthLevel::Fair => "#FFC107",
            StrengthLevel::Good => "#8BC34A",
            StrengthLevel::Strong => "#4CAF50",
            StrengthLevel::VeryStrong => "#2E7D32",
            StrengthLevel::Excellent => "#1B5E20",
            StrengthLevel::Unknown => "#757575",
        }
    }
}

/// Result of assessing one candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthAssessment {
    pub level: StrengthLevel,
    pub score: u8,
}

/// Score a candidate password.
pub fn assess_strength(password: &str) -> StrengthAssessment {
    let mut score = 0u8;

    // Length thresholds — three independent points.
    let len = password.chars().count();
    if len >= 8 {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if len >= 16 {
        score += 1;
    }

    // Character variety — one point per present class.
    if password.chars().any(|c| c.is_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| DEFAULT_SYMBOLS.contains(c)) {
        score += 1;
    }

    StrengthAssessment {
        level: StrengthLevel::from_score(score),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_scores_zero() {
        let a = assess_strength("");
        assert_eq!(a.score, 0);
        assert_eq!(a.level, StrengthLevel::VeryWeak);
    }

    #[test]
    fn known_scores() {
        // 8 lowercase chars: length(1) + lowercase(1).
        assert_eq!(assess_strength("aaaaaaaa").score, 2);
        // Adds uppercase, digit, symbol at the same length.
        assert_eq!(assess_strength("Aa1!aaaa").score, 5);
        // 16+ chars with all four classes hits the ceiling.
        assert_eq!(assess_strength("Aa1!Aa1!Aa1!Aa1!").score, MAX_SCORE);
    }

    #[test]
    fn adding_variety_never_lowers_the_score() {
        let base = assess_strength("aaaaaaaa").score;
        let varied = assess_strength("Aa1!aaaa").score;
        assert!(base <= varied);
    }

    #[test]
    fn adding_length_never_lowers_the_score() {
        let short = assess_strength("Aa1!xyzw").score;
        let long = assess_strength("Aa1!xyzwAa1!xyzw").score;
        assert!(short <= long);
    }

    #[test]
    fn level_table_is_fixed() {
        assert_eq!(StrengthLevel::from_score(0), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(1), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(2), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_score(3), StrengthLevel::Fair);
        assert_eq!(StrengthLevel::from_score(4), StrengthLevel::Good);
        assert_eq!(StrengthLevel::from_score(5), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_score(6), StrengthLevel::VeryStrong);
        assert_eq!(StrengthLevel::from_score(7), StrengthLevel::Excellent);
        assert_eq!(StrengthLevel::from_score(42), StrengthLevel::Unknown);
    }

    #[test]
    fn each_level_has_a_color() {
        for score in 0..=MAX_SCORE {
            assert!(StrengthLevel::from_score(score).color().starts_with('#'));
        }
        assert_eq!(StrengthLevel::Unknown.color(), "#757575");
    }
}
