//! `cryptvault decrypt` — decrypt an encrypted file back to plaintext.

use std::path::Path;

use crate::cli::{open_vault, output, warn_if_store_degraded, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(
    cli: &Cli,
    input: &Path,
    output_path: Option<&Path>,
    password: Option<&str>,
    key: Option<&str>,
    key_name: Option<&str>,
) -> Result<()> {
    let mut vault = open_vault(cli)?;

    if let Some(name) = key_name {
        output::info(&format!("Using saved key: {name}"));
    }

    let written = vault.decrypt_file(input, output_path, password, key, key_name)?;
    warn_if_store_degraded(&vault);

    output::success(&format!("File decrypted: {}", written.display()));

    Ok(())
}
