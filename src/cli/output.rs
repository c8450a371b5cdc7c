//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::keystore::KeyRecords;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of saved keys (Name, Type, Created, Used for).
pub fn print_keys_table(records: &KeyRecords) {
    if records.is_empty() {
        info("No saved keys yet.");
        tip("Run `cryptvault save-key <name> -p <password>` to save your first key.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Created", "Used for"]);

    for (name, record) in records {
        table.add_row(vec![
            name.clone(),
            record.kind_label().to_string(),
            record.created.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{} file(s)", record.files.len()),
        ]);
    }

    println!("{table}");
    info(&format!("Total: {} saved key(s)", records.len()));
}
