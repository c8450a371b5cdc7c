//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force
//! and GPU-based attacks.  The parameters are a single fixed constant
//! for the whole key store: a stored salt must re-derive the exact
//! same key bit-for-bit forever, so the work factor cannot vary per
//! record.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::crypto::keys::{KeyMaterial, KEY_LEN};
use crate::errors::{CryptVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Argon2id memory cost in KiB (64 MB).
const MEMORY_KIB: u32 = 65_536;

/// Argon2id iteration count.
const ITERATIONS: u32 = 3;

/// Argon2id parallelism lanes.
const PARALLELISM: u32 = 4;

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt always produce the same key.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<KeyMaterial> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| CryptVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = vec![0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| {
            CryptVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
        })?;

    Ok(KeyMaterial::from_bytes(key))
}

/// Derive a key with a freshly generated random salt.
///
/// Returns the salt alongside the key so the caller can persist it.
pub fn derive_with_fresh_salt(password: &str) -> Result<(KeyMaterial, [u8; SALT_LEN])> {
    let salt = generate_salt();
    let key = derive_key(password, &salt)?;
    Ok((key, salt))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
