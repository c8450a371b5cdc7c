//! Key store module — named key records and their persisted document.
//!
//! This module provides:
//! - `KeyRecord` and the `KeySource` tagged union (`record`)
//! - The persisted `.keys.json` document with lazy load, degrade-on-
//!   corruption, and full-overwrite save (`store`)

pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use record::{KeyRecord, KeySource};
pub use store::{KeyRecords, KeyStore, STORE_FILE_NAME};
