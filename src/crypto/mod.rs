//! Cryptographic subsystem for CredVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption of secret fields (`cipher`)
//! - Master key artifact lifecycle (`keyfile`)
//! - The in-memory `MasterKey` wrapper and HKDF sub-key derivation (`keys`)
//! - PBKDF2 credential hashing for verification workflows (`hasher`)

pub mod cipher;
pub mod hasher;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items.
pub use cipher::{decrypt, encrypt};
pub use hasher::{hash, verify};
pub use keyfile::ensure_key;
pub use keys::MasterKey;
