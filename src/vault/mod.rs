//! Vault module — the encrypt/decrypt engine.
//!
//! This module provides the high-level `Vault` handle that resolves
//! key material, invokes the cipher, and keeps the key store in sync.

pub mod engine;

// Re-export the most commonly used items.
pub use engine::{EncryptOutcome, Vault, DECRYPTED_SUFFIX, ENCRYPTED_SUFFIX};
