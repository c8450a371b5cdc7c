use clap::Parser;
use cryptvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt {
            ref input,
            ref output,
            ref password,
            ref key_name,
        } => cryptvault::cli::commands::encrypt::execute(
            &cli,
            input,
            output.as_deref(),
            password.as_deref(),
            key_name.as_deref(),
        ),
        Commands::Decrypt {
            ref input,
            ref output,
            ref password,
            ref key,
            ref key_name,
        } => cryptvault::cli::commands::decrypt::execute(
            &cli,
            input,
            output.as_deref(),
            password.as_deref(),
            key.as_deref(),
            key_name.as_deref(),
        ),
        Commands::SaveKey {
            ref name,
            ref password,
            ref key,
        } => cryptvault::cli::commands::save_key::execute(
            &cli,
            name,
            password.as_deref(),
            key.as_deref(),
        ),
        Commands::ListKeys => cryptvault::cli::commands::list_keys::execute(&cli),
        Commands::Completions { ref shell } => {
            cryptvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        cryptvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
