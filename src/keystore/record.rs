//! Key records persisted in the key store document.
//!
//! Each record describes how to obtain a symmetric key: either by
//! re-deriving it from a password plus the stored salt, or by reading
//! stored key material directly.  A password-derived record never
//! holds the password or the derived key, only the salt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-use the base64 serde helpers from store.rs (no duplication).
use super::store::{base64_decode, base64_encode};

/// How the key for a record is obtained.
///
/// Serialized with a `type` tag of `"password"` or `"key"` so the
/// store document stays readable and the two shapes cannot mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KeySource {
    /// Re-derive the key from a password and this stored salt.
    Password {
        /// The random salt generated when the record was created.
        /// Serialized as a base64 string in JSON.
        #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
        salt: Vec<u8>,
    },

    /// Use the stored key material directly.
    Key {
        /// The key as a URL-safe base64 token.
        key: String,
    },
}

/// A single named key record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Password-derived or raw key material.
    #[serde(flatten)]
    pub source: KeySource,

    /// When this record was created.
    pub created: DateTime<Utc>,

    /// Names (not paths) of encrypted output files produced with this
    /// key.  Append-only and deduplicated; insertion order preserved.
    #[serde(default)]
    pub files: Vec<String>,
}

impl KeyRecord {
    /// Create a password-derived record holding only the salt.
    pub fn password_derived(salt: &[u8]) -> Self {
        Self {
            source: KeySource::Password {
                salt: salt.to_vec(),
            },
            created: Utc::now(),
            files: Vec::new(),
        }
    }

    /// Create a raw-key record from an encoded key token.
    pub fn raw(key: String) -> Self {
        Self {
            source: KeySource::Key { key },
            created: Utc::now(),
            files: Vec::new(),
        }
    }

    /// Record that `filename` was produced with this key.
    ///
    /// Idempotent: recording the same name twice keeps a single entry.
    /// Returns whether the list actually changed.
    pub fn record_usage(&mut self, filename: &str) -> bool {
        if self.files.iter().any(|f| f == filename) {
            return false;
        }
        self.files.push(filename.to_string());
        true
    }

    /// True if this record's usage list references `filename`.
    pub fn used_for(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f == filename)
    }

    /// The wire label of the record kind ("password" or "key").
    pub fn kind_label(&self) -> &'static str {
        match self.source {
            KeySource::Password { .. } => "password",
            KeySource::Key { .. } => "key",
        }
    }
}
