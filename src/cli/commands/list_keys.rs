//! `cryptvault list-keys` — display all saved keys in a table.

use crate::cli::{open_vault, output, warn_if_store_degraded, Cli};
use crate::errors::Result;

/// Execute the `list-keys` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;

    let records = vault.list_keys();
    warn_if_store_degraded(&vault);

    output::print_keys_table(&records);

    Ok(())
}
