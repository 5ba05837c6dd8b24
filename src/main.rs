use clap::Parser;
use mixoteca::cli::commands::{Cli, Commands};
use mixoteca::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let catalog_dir = cli.catalog_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = mixoteca::tui::run(catalog_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before catalog discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
