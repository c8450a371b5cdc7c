//! `cryptvault save-key` — persist a named key for reuse.

use crate::cli::{open_vault, output, warn_if_store_degraded, Cli};
use crate::errors::Result;

/// Execute the `save-key` command.
pub fn execute(cli: &Cli, name: &str, password: Option<&str>, key: Option<&str>) -> Result<()> {
    let mut vault = open_vault(cli)?;

    vault.save_key(name, password, key)?;
    warn_if_store_degraded(&vault);

    output::success(&format!("Key '{name}' saved"));
    if password.is_some() {
        output::tip("Only a salt was stored; the password itself is never written to disk.");
    }

    Ok(())
}
