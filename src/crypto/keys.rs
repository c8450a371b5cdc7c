//! Symmetric key material and its transportable encoding.
//!
//! Internally a key is raw bytes; everywhere else it travels as a
//! URL-safe base64 token: in the key store document, on the command
//! line, and in `save-key` input.  `KeyMaterial` wraps the bytes and
//! zeroes them on drop.

use base64::engine::general_purpose::URL_SAFE as BASE64_URL;
use base64::Engine;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{CryptVaultError, Result};

/// Length of a symmetric key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Symmetric key bytes, zeroized on drop.
///
/// The byte length is not enforced here: a direct key pasted by the
/// user may decode to anything, and the cipher rejects wrong-length
/// keys at the point of use.
pub struct KeyMaterial(Zeroizing<Vec<u8>>);

impl KeyMaterial {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generate a fresh random 32-byte key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Decode a URL-safe base64 token into key material.
    pub fn from_encoded(token: &str) -> Result<Self> {
        let bytes = BASE64_URL
            .decode(token.trim())
            .map_err(|_| CryptVaultError::InvalidKeyFormat("key must be base64 encoded".into()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Interpret a user-supplied key string.
    ///
    /// Two-step parse: first attempt a strict base64 decode, and if
    /// that fails treat the literal input bytes as the key material.
    /// The caller may have pasted either form, so the decode failure
    /// is absorbed here rather than surfaced.
    pub fn from_encoded_or_raw(input: &str) -> Self {
        match Self::from_encoded(input) {
            Ok(key) => key,
            Err(_) => Self::from_bytes(input.as_bytes().to_vec()),
        }
    }

    /// Encode as a URL-safe base64 token for storage or display.
    ///
    /// `from_encoded(k.encode())` always reproduces `k` exactly.
    pub fn encode(&self) -> String {
        BASE64_URL.encode(self.0.as_slice())
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of raw key bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no key bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for KeyMaterial {
    /// Constant-time comparison; differing lengths compare unequal.
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for KeyMaterial {}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}
