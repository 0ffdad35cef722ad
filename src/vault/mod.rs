//! Vault module — encrypted credential storage and the engine façade.
//!
//! This module provides:
//! - `CredentialRecord` and `RecordSummary` types (`record`)
//! - The SQLite-backed `VaultStore` with its uniqueness discipline (`store`)
//! - Duplicate classification and the resolution protocol (`duplicates`)
//! - The `Vault` façade the presentation layer talks to (`facade`)

pub mod duplicates;
pub mod facade;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use duplicates::{DuplicateCheck, NearMatchScope, Resolution, SaveOutcome, SaveReport};
pub use facade::{SaveRequest, Vault};
pub use record::{CredentialRecord, RecordSummary, DEFAULT_CATEGORY};
pub use store::VaultStore;
