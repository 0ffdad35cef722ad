//! Duplicate detection and the conflict-resolution protocol.
//!
//! A save first classifies the incoming identity pair against the
//! store: an exact match (case-insensitive equality on both fields)
//! blocks the save until the caller picks a `Resolution`; near matches
//! (partial textual overlap) are advisory and never block.  The engine
//! holds no pending-conflict state between calls — the caller obtains a
//! `DuplicateCheck`, decides, and passes the decision into a single
//! resolved save.

use std::str::FromStr;

use crate::errors::VaultError;
use crate::vault::record::RecordSummary;

/// The caller's decision for an exact-identity conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Replace the existing record in place, at its stored identity.
    Overwrite,
    /// Derive a fresh unique site identity and insert a new record.
    CreateNew,
    /// Abort the save; no mutation occurs.
    Cancel,
}

/// Which identity fields participate in near-match detection.
///
/// OR-substring matching across both fields can surface matches
/// unrelated to the intended site (an account substring collision
/// reported as a site near-duplicate), so the scope is configurable
/// rather than fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearMatchScope {
    /// Substring overlap on site OR account.
    #[default]
    SiteOrAccount,
    /// Substring overlap on site only.
    SiteOnly,
}

impl FromStr for NearMatchScope {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site-or-account" => Ok(NearMatchScope::SiteOrAccount),
            "site-only" => Ok(NearMatchScope::SiteOnly),
            other => Err(VaultError::ConfigError(format!(
                "unknown near_match_scope '{other}' — expected 'site-or-account' or 'site-only'"
            ))),
        }
    }
}

/// Result of classifying an identity pair against the store.
#[derive(Debug, Clone, Default)]
pub struct DuplicateCheck {
    /// The record whose identity matches case-insensitively, if any.
    pub exact: Option<RecordSummary>,
    /// Records with partial overlap — advisory only.
    pub near: Vec<RecordSummary>,
}

impl DuplicateCheck {
    /// `true` when a save of this pair requires a `Resolution`.
    pub fn is_exact_conflict(&self) -> bool {
        self.exact.is_some()
    }
}

/// Terminal state of a resolved save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was inserted.
    Saved,
    /// An existing record was overwritten in place.
    Updated,
    /// The caller cancelled; nothing was written.
    Cancelled,
}

/// What a save actually did, for the presentation layer.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub outcome: SaveOutcome,
    /// The site identity the record ended up under (differs from the
    /// request after a `CreateNew` rename).
    pub site: String,
    /// Advisory near matches observed during the save.
    pub near: Vec<RecordSummary>,
}
