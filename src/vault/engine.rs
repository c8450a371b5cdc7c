//! High-level vault operations used by CLI commands.
//!
//! `Vault` orchestrates encrypt and decrypt requests: it resolves
//! which key material to use (a named saved key, a password, a direct
//! key, or a freshly generated one), invokes the cipher, maintains
//! the output path conventions, and keeps the key store persisted
//! before an operation reports success.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::crypto::cipher;
use crate::crypto::kdf;
use crate::crypto::keys::KeyMaterial;
use crate::errors::{CryptVaultError, Result};
use crate::keystore::{KeyRecord, KeyRecords, KeySource, KeyStore};

/// Suffix appended to encrypted output names by default.
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// Suffix appended to decrypted output names by default.
pub const DECRYPTED_SUFFIX: &str = ".decrypted";

/// Result of an encrypt operation.
pub struct EncryptOutcome {
    /// Where the sealed blob was written.
    pub output_path: PathBuf,

    /// Name of the store record used or created for this encryption.
    pub key_id: String,
}

/// The main vault handle, bound to one sandbox directory.
///
/// One `Vault` is the sole writer of its key store document.  Two
/// vaults over the same directory mutating concurrently can lose an
/// update (last save wins); serialize access externally if that
/// matters.
pub struct Vault {
    /// Directory for encrypted outputs and the key store document.
    sandbox_dir: PathBuf,

    /// The persisted key name -> record mapping.
    store: KeyStore,
}

impl Vault {
    /// Open a vault over `sandbox_dir`, creating the directory if
    /// needed.  The key store is not read until first use.
    pub fn open(sandbox_dir: &Path) -> Result<Self> {
        fs::create_dir_all(sandbox_dir)?;
        Ok(Self {
            sandbox_dir: sandbox_dir.to_path_buf(),
            store: KeyStore::new(sandbox_dir),
        })
    }

    /// The sandbox directory this vault operates in.
    pub fn sandbox_dir(&self) -> &Path {
        &self.sandbox_dir
    }

    /// If the key store document was unreadable and replaced with an
    /// empty store, the cause.  See `KeyStore::degradation`.
    pub fn store_degradation(&self) -> Option<&str> {
        self.store.degradation()
    }

    // ------------------------------------------------------------------
    // Encrypt
    // ------------------------------------------------------------------

    /// Encrypt `input_path` into an opaque sealed blob.
    ///
    /// Key selection, in order of precedence:
    /// 1. `key_name`: use that saved record (a password is required if
    ///    the record is password-derived); the output name is recorded
    ///    in the record's usage list.
    /// 2. `password`: derive a fresh key with a new random salt and
    ///    save it under a generated `key_<id>` name.
    /// 3. neither: generate a random key and save it the same way; the
    ///    stored record is then the only copy of that key.
    ///
    /// Whatever record was touched is persisted before this returns.
    pub fn encrypt_file(
        &mut self,
        input_path: &Path,
        output_path: Option<&Path>,
        password: Option<&str>,
        key_name: Option<&str>,
    ) -> Result<EncryptOutcome> {
        if !input_path.exists() {
            return Err(CryptVaultError::InputNotFound(input_path.to_path_buf()));
        }

        let output_path = self.resolve_encrypt_output(input_path, output_path)?;
        let output_name = file_name_of(&output_path)?;

        let (key, key_id) = match key_name {
            Some(name) => {
                let key = self.key_for_saved_record(name, password)?;
                self.store.record_file_usage(name, &output_name)?;
                (key, name.to_string())
            }
            None => match password {
                Some(password) => {
                    let (key, salt) = kdf::derive_with_fresh_salt(password)?;
                    let key_id = generate_key_id();
                    let mut record = KeyRecord::password_derived(&salt);
                    record.record_usage(&output_name);
                    self.store.create_or_update(&key_id, record)?;
                    (key, key_id)
                }
                None => {
                    let key = KeyMaterial::generate();
                    let key_id = generate_key_id();
                    let mut record = KeyRecord::raw(key.encode());
                    record.record_usage(&output_name);
                    self.store.create_or_update(&key_id, record)?;
                    (key, key_id)
                }
            },
        };

        let plaintext = fs::read(input_path)?;
        let sealed = cipher::seal(&key, &plaintext)?;
        fs::write(&output_path, sealed)?;

        Ok(EncryptOutcome {
            output_path,
            key_id,
        })
    }

    // ------------------------------------------------------------------
    // Decrypt
    // ------------------------------------------------------------------

    /// Decrypt a sealed blob back to plaintext.
    ///
    /// Key selection, in order of precedence:
    /// 1. `key_name`: use that saved record.  Unlike encrypt, this does
    ///    not touch the record's usage list.
    /// 2. `key`: a direct key token; literal bytes are accepted as a
    ///    fallback if the token does not decode.
    /// 3. `password`: scan password-derived records for one whose usage
    ///    list contains this file's name and re-derive from its salt.
    /// 4. nothing: an error.
    pub fn decrypt_file(
        &mut self,
        input_path: &Path,
        output_path: Option<&Path>,
        password: Option<&str>,
        key: Option<&str>,
        key_name: Option<&str>,
    ) -> Result<PathBuf> {
        if !input_path.exists() {
            return Err(CryptVaultError::InputNotFound(input_path.to_path_buf()));
        }

        let output_path = self.resolve_decrypt_output(input_path, output_path)?;

        let resolved = if let Some(name) = key_name {
            self.key_for_saved_record(name, password)?
        } else if let Some(token) = key {
            KeyMaterial::from_encoded_or_raw(token)
        } else if let Some(password) = password {
            self.key_from_file_usage(input_path, password)?
        } else {
            return Err(CryptVaultError::CredentialsRequired(
                "Must provide a password, key, or key name for decryption".into(),
            ));
        };

        let sealed = fs::read(input_path)?;
        let plaintext = cipher::open(&resolved, &sealed).map_err(|e| match e {
            already @ CryptVaultError::DecryptionFailed(_) => already,
            other => CryptVaultError::DecryptionFailed(other.to_string()),
        })?;
        fs::write(&output_path, plaintext)?;

        Ok(output_path)
    }

    // ------------------------------------------------------------------
    // Key management
    // ------------------------------------------------------------------

    /// Save a key under a descriptive name for later reuse.
    ///
    /// Exactly one of `password` / `key` must be given.  A password is
    /// never stored: a fresh salt is generated and only the salt is
    /// persisted.  A direct key must decode as a base64 token.  An
    /// existing record of the same name is replaced silently (last
    /// write wins).
    pub fn save_key(
        &mut self,
        name: &str,
        password: Option<&str>,
        key: Option<&str>,
    ) -> Result<()> {
        let record = match (password, key) {
            (Some(password), None) => {
                // The derived key is discarded; only the salt matters.
                let (_, salt) = kdf::derive_with_fresh_salt(password)?;
                KeyRecord::password_derived(&salt)
            }
            (None, Some(token)) => {
                KeyMaterial::from_encoded(token)?;
                KeyRecord::raw(token.trim().to_string())
            }
            (Some(_), Some(_)) => {
                return Err(CryptVaultError::CredentialsRequired(
                    "Provide either a password or a key, not both".into(),
                ));
            }
            (None, None) => {
                return Err(CryptVaultError::CredentialsRequired(
                    "Must provide either a password or a key".into(),
                ));
            }
        };

        self.store.create_or_update(name, record)
    }

    /// All saved key records.  Read-only; no side effects.
    pub fn list_keys(&mut self) -> KeyRecords {
        self.store.records().clone()
    }

    /// A single record by name, e.g. to surface a generated raw key
    /// back to the caller.
    pub fn key_record(&mut self, name: &str) -> Option<&KeyRecord> {
        self.store.get(name)
    }

    // ------------------------------------------------------------------
    // Key resolution helpers
    // ------------------------------------------------------------------

    /// Obtain key material for a saved record.
    ///
    /// Password-derived records require `password` and re-derive from
    /// the stored salt; raw records decode their stored material.
    fn key_for_saved_record(&mut self, name: &str, password: Option<&str>) -> Result<KeyMaterial> {
        let record = self
            .store
            .get(name)
            .ok_or_else(|| CryptVaultError::KeyNotFound(name.to_string()))?;

        match &record.source {
            KeySource::Password { salt } => {
                let password =
                    password.ok_or_else(|| CryptVaultError::PasswordRequired(name.to_string()))?;
                let salt = salt.clone();
                kdf::derive_key(password, &salt)
            }
            KeySource::Key { key } => KeyMaterial::from_encoded(&key),
        }
    }

    /// Find the salt for a password-only decrypt by scanning saved
    /// password-derived records for one that produced `input_path`.
    ///
    /// Records are scanned in store order (lexicographic by name);
    /// the first match wins.
    fn key_from_file_usage(&mut self, input_path: &Path, password: &str) -> Result<KeyMaterial> {
        let input_name = file_name_of(input_path)?;

        let salt = self
            .store
            .records()
            .values()
            .find_map(|record| match &record.source {
                KeySource::Password { salt } if record.used_for(&input_name) => Some(salt.clone()),
                _ => None,
            });

        match salt {
            Some(salt) => kdf::derive_key(password, &salt),
            None => Err(CryptVaultError::KeyResolutionFailed(input_name)),
        }
    }

    // ------------------------------------------------------------------
    // Output path conventions
    // ------------------------------------------------------------------

    /// Default: `<sandbox>/<input-name>.encrypted`.  An explicit path
    /// gets its parent directories created.
    fn resolve_encrypt_output(
        &self,
        input_path: &Path,
        explicit: Option<&Path>,
    ) -> Result<PathBuf> {
        match explicit {
            Some(path) => {
                create_parent_dirs(path)?;
                Ok(path.to_path_buf())
            }
            None => {
                let name = file_name_of(input_path)?;
                Ok(self.sandbox_dir.join(format!("{name}{ENCRYPTED_SUFFIX}")))
            }
        }
    }

    /// Default: strip a trailing `.encrypted` from the input name and
    /// append `.decrypted`, in the sandbox directory.
    fn resolve_decrypt_output(
        &self,
        input_path: &Path,
        explicit: Option<&Path>,
    ) -> Result<PathBuf> {
        match explicit {
            Some(path) => {
                create_parent_dirs(path)?;
                Ok(path.to_path_buf())
            }
            None => {
                let name = file_name_of(input_path)?;
                Ok(self.sandbox_dir.join(default_decrypt_name(&name)))
            }
        }
    }
}

/// Generate a unique identifier for an anonymous key record.
///
/// A UUID keeps two encryptions in the same instant from colliding,
/// which a wall-clock timestamp alone would not.
fn generate_key_id() -> String {
    format!("key_{}", Uuid::new_v4())
}

/// `notes.txt.encrypted` becomes `notes.txt.decrypted`.
fn default_decrypt_name(input_name: &str) -> String {
    let stem = input_name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(input_name);
    format!("{stem}{DECRYPTED_SUFFIX}")
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CryptVaultError::CommandFailed(format!("path '{}' has no file name", path.display()))
        })
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
