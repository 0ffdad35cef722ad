use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref site,
            ref account,
            ref password,
            ref category,
            on_duplicate,
        } => credvault::cli::commands::add::execute(
            &cli,
            site,
            account,
            password.as_deref(),
            category.as_deref(),
            on_duplicate,
        ),
        Commands::List { json } => credvault::cli::commands::list::execute(&cli, json),
        Commands::Search { ref term, json } => {
            credvault::cli::commands::search::execute(&cli, term, json)
        }
        Commands::Show {
            ref site,
            ref account,
            copy,
        } => credvault::cli::commands::show::execute(&cli, site, account, copy),
        Commands::Delete {
            ref site,
            ref account,
            force,
        } => credvault::cli::commands::delete::execute(&cli, site, account, force),
        Commands::Generate {
            length,
            no_lowercase,
            no_uppercase,
            no_digits,
            no_symbols,
            ref digits,
            ref symbols,
            check,
        } => credvault::cli::commands::generate::execute(
            length,
            no_lowercase,
            no_uppercase,
            no_digits,
            no_symbols,
            digits.as_deref(),
            symbols.as_deref(),
            check,
        ),
        Commands::Strength { ref password } => {
            credvault::cli::commands::strength::execute(password.as_deref())
        }
        Commands::Audit { last, ref since } => {
            credvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => credvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
