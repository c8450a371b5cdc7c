//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting.
//!
//! Layout of the sealed blob:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::crypto::keys::{KeyMaterial, KEY_LEN};
use crate::errors::{CryptVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Build the cipher, rejecting key material of the wrong length.
fn build_cipher(key: &KeyMaterial) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| {
        CryptVaultError::InvalidKeyFormat(format!(
            "key must be {KEY_LEN} bytes, got {}",
            key.len()
        ))
    })
}

/// Encrypt and authenticate `plaintext` under `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn seal(key: &KeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key)?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a blob that was produced by `seal`.
///
/// Wrong key, wrong password, and corrupted ciphertext are
/// indistinguishable here; all three surface as the same failure.
pub fn open(key: &KeyMaterial, blob: &[u8]) -> Result<Vec<u8>> {
    // Make sure we have at least a nonce worth of bytes.
    if blob.len() < NONCE_LEN {
        return Err(CryptVaultError::DecryptionFailed(
            "blob too short to contain a nonce".into(),
        ));
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = build_cipher(key)?;

    cipher.decrypt(nonce, ciphertext).map_err(|_| {
        CryptVaultError::DecryptionFailed("authentication failed, wrong key or corrupted data".into())
    })
}
