//! Cryptographic primitives for CryptVault.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening (`cipher`)
//! - Argon2id password-based key derivation (`kdf`)
//! - Symmetric key material and its transportable encoding (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, KeyMaterial, ...};
pub use cipher::{open, seal};
pub use kdf::{derive_key, derive_with_fresh_salt, generate_salt, SALT_LEN};
pub use keys::{KeyMaterial, KEY_LEN};
