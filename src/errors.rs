use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CryptVault.
#[derive(Debug, Error)]
pub enum CryptVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    // --- Key / credential errors ---
    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Could not resolve a key for '{0}'")]
    KeyResolutionFailed(String),

    #[error("Password required for '{0}'")]
    PasswordRequired(String),

    #[error("Credentials required: {0}")]
    CredentialsRequired(String),

    // --- Vault errors ---
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    // --- Store errors ---
    #[error("Failed to write key store: {0}")]
    StoreWriteFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for CryptVault results.
pub type Result<T> = std::result::Result<T, CryptVaultError>;
