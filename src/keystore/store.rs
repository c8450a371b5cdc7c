//! The persisted key store document.
//!
//! One JSON document per sandbox directory, hidden as `.keys.json`,
//! mapping key name to `KeyRecord`.  The document is lazily loaded on
//! first access, cached in memory, and fully rewritten on every
//! mutation.  An unreadable or malformed document degrades to an
//! empty store, with the cause kept for the caller to report; a
//! failed write is fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{CryptVaultError, Result};
use crate::keystore::record::KeyRecord;

/// File name of the key store document inside the sandbox directory.
pub const STORE_FILE_NAME: &str = ".keys.json";

/// Map of key name to record.
///
/// A `BTreeMap` keeps iteration deterministic (lexicographic by key
/// name), which matters when a password-only decrypt scans records
/// for a matching file usage: ties must resolve the same way on
/// every run.
pub type KeyRecords = BTreeMap<String, KeyRecord>;

/// Handle to the key store document of one sandbox directory.
///
/// One instance is the sole writer of its document; two instances
/// over the same directory can lose updates to each other (last save
/// wins at the file level).
pub struct KeyStore {
    /// Path to the `.keys.json` document on disk.
    path: PathBuf,

    /// In-memory records, populated on first access.
    cache: Option<KeyRecords>,

    /// Cause of a degraded load, if the document was unreadable.
    degraded: Option<String>,
}

impl KeyStore {
    /// Create a store handle for the given sandbox directory.
    ///
    /// Nothing is read from disk until the first access.
    pub fn new(sandbox_dir: &Path) -> Self {
        Self {
            path: sandbox_dir.join(STORE_FILE_NAME),
            cache: None,
            degraded: None,
        }
    }

    /// Path to the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// If the document on disk was unreadable or malformed, the cause.
    ///
    /// The store then behaves as empty; records that were in the bad
    /// document are lost once the next mutation rewrites it.
    pub fn degradation(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    /// All records, reading the document on first call.
    pub fn records(&mut self) -> &KeyRecords {
        self.load_cache()
    }

    /// Look up a record by name.
    pub fn get(&mut self, name: &str) -> Option<&KeyRecord> {
        self.load_cache().get(name)
    }

    /// Insert or replace a record, then persist.
    ///
    /// An existing record of the same name is replaced silently:
    /// last write wins.
    pub fn create_or_update(&mut self, name: &str, record: KeyRecord) -> Result<()> {
        self.load_cache().insert(name.to_string(), record);
        self.save()
    }

    /// Append `filename` to a record's usage list, then persist.
    pub fn record_file_usage(&mut self, name: &str, filename: &str) -> Result<()> {
        match self.load_cache().get_mut(name) {
            Some(record) => {
                record.record_usage(filename);
                self.save()
            }
            None => Err(CryptVaultError::KeyNotFound(name.to_string())),
        }
    }

    /// Write the full document back to disk, replacing what was there.
    ///
    /// Writes to a temp file in the same directory and renames it into
    /// place, so readers never see a half-written document.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_loaded();
        let json = {
            let records = self.cache.get_or_insert_with(KeyRecords::new);
            serde_json::to_string_pretty(records)
                .map_err(|e| CryptVaultError::SerializationError(format!("key store: {e}")))?
        };

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json)
            .map_err(|e| CryptVaultError::StoreWriteFailed(e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| CryptVaultError::StoreWriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Populate the cache from disk if this is the first access.
    fn ensure_loaded(&mut self) {
        if self.cache.is_none() {
            let records = self.read_document();
            self.cache = Some(records);
        }
    }

    fn load_cache(&mut self) -> &mut KeyRecords {
        self.ensure_loaded();
        self.cache.get_or_insert_with(KeyRecords::new)
    }

    /// Read the document, degrading to an empty store on failure.
    ///
    /// A missing file is simply an empty store.  Unreadable or
    /// malformed content also yields an empty store, with the cause
    /// recorded in `degraded` so the CLI layer can warn.
    fn read_document(&mut self) -> KeyRecords {
        if !self.path.exists() {
            return KeyRecords::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    self.degraded = Some(format!("malformed key store document: {e}"));
                    KeyRecords::new()
                }
            },
            Err(e) => {
                self.degraded = Some(format!("unreadable key store document: {e}"));
                KeyRecords::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
