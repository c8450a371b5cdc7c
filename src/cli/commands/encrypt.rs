//! `cryptvault encrypt` — encrypt a file with a password, a saved
//! key, or a freshly generated random key.

use std::path::Path;

use crate::cli::{open_vault, output, warn_if_store_degraded, Cli};
use crate::errors::Result;
use crate::keystore::KeySource;

/// Execute the `encrypt` command.
pub fn execute(
    cli: &Cli,
    input: &Path,
    output_path: Option<&Path>,
    password: Option<&str>,
    key_name: Option<&str>,
) -> Result<()> {
    let mut vault = open_vault(cli)?;

    let outcome = vault.encrypt_file(input, output_path, password, key_name)?;
    warn_if_store_degraded(&vault);

    output::success(&format!("File encrypted: {}", outcome.output_path.display()));

    if key_name.is_some() {
        output::info(&format!("Using saved key: {}", outcome.key_id));
        return Ok(());
    }

    // A new record was created.  For a generated raw key, print the
    // token: the store entry is its only copy.
    if let Some(record) = vault.key_record(&outcome.key_id) {
        if let KeySource::Key { key } = &record.source {
            output::warning(&format!("Randomly generated key: {key}"));
            output::tip("Save this key somewhere safe. You will need it to decrypt.");
        }
    }
    output::success(&format!("Key saved as: {}", outcome.key_id));

    Ok(())
}
