//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;
use crate::vault::Vault;

/// CryptVault CLI: password/key-based file encryption.
#[derive(Parser)]
#[command(
    name = "cryptvault",
    about = "Encrypt and decrypt files with passwords or saved keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sandbox directory for encrypted files and key storage (default: sandbox)
    #[arg(long, global = true, value_name = "DIR", env = "CRYPTVAULT_SANDBOX_DIR")]
    pub sandbox_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a file
    Encrypt {
        /// Input file to encrypt
        input: PathBuf,

        /// Output file path (default: <sandbox>/<name>.encrypted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password for encryption (a random key is generated if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Name of a saved key to use
        #[arg(short = 'k', long = "key-name")]
        key_name: Option<String>,
    },

    /// Decrypt a file
    Decrypt {
        /// Encrypted file to decrypt
        input: PathBuf,

        /// Output file path (default: <sandbox>/<name>.decrypted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password for decryption
        #[arg(short, long)]
        password: Option<String>,

        /// Direct key (base64 token)
        #[arg(short = 'k', long)]
        key: Option<String>,

        /// Name of a saved key
        #[arg(short = 'n', long = "key-name")]
        key_name: Option<String>,
    },

    /// Save a key under a name for reuse
    SaveKey {
        /// Descriptive name for the key
        name: String,

        /// Password to save (only a salt is stored, never the password)
        #[arg(short, long)]
        password: Option<String>,

        /// Direct key to save (base64 token)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },

    /// List all saved keys
    ListKeys,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Open the vault over the sandbox directory resolved from the CLI
/// arguments and the optional `.cryptvault.toml` config file.
pub fn open_vault(cli: &Cli) -> Result<Vault> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let sandbox = settings.resolve_sandbox_dir(cli.sandbox_dir.as_deref());
    Vault::open(&sandbox)
}

/// Report if the key store document had to be replaced with an empty
/// store because it was unreadable or malformed.
pub fn warn_if_store_degraded(vault: &Vault) {
    if let Some(cause) = vault.store_degradation() {
        output::warning(&format!("Key store was reset to empty: {cause}"));
    }
}
