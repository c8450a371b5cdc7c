use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CryptVaultError, Result};

/// Project-level configuration, loaded from `.cryptvault.toml`.
///
/// Every field has a sensible default so CryptVault works
/// out-of-the-box without any config file at all.
///
/// The KDF work factor is deliberately not configurable: stored salts
/// must re-derive identical keys forever, so those parameters are one
/// global constant in the crypto layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory where encrypted outputs and the key store document
    /// live when `--sandbox-dir` is not given.
    #[serde(default = "default_sandbox_dir")]
    pub sandbox_dir: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_sandbox_dir() -> String {
    "sandbox".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            sandbox_dir: default_sandbox_dir(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".cryptvault.toml";

    /// Load settings from `<project_dir>/.cryptvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If the file
    /// exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            CryptVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the sandbox directory: an explicit CLI value wins over
    /// the configured default.
    pub fn resolve_sandbox_dir(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(&self.sandbox_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.sandbox_dir, "sandbox");
    }

    #[test]
    fn config_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".cryptvault.toml"), "sandbox_dir = \"vault\"").unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.sandbox_dir, "vault");
    }

    #[test]
    fn unparseable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".cryptvault.toml"), "sandbox_dir = [").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn explicit_dir_wins_over_config() {
        let settings = Settings::default();
        let resolved = settings.resolve_sandbox_dir(Some(Path::new("/tmp/elsewhere")));
        assert_eq!(resolved, PathBuf::from("/tmp/elsewhere"));
    }
}
