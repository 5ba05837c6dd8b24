use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mixo", about = concat!("mixoteca v", env!("CARGO_PKG_VERSION"), " - drinks, ingredients, checklists"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different catalog directory
    #[arg(short = 'C', long = "catalog-dir", global = true)]
    pub catalog_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new catalog in the current directory
    Init(InitArgs),
    /// List records, optionally filtered by a search query
    List(ListArgs),
    /// Show a record's ingredients
    Show(ShowArgs),
    /// Toggle ingredients in a record's checklist
    Check(CheckArgs),
    /// Clear every checked ingredient of a record
    Clear(ClearArgs),
    /// View the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Catalog name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Search query (matches name, tags and ingredients)
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Record id
    pub id: u64,
    /// Show as a checklist with progress
    #[arg(long)]
    pub checklist: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Record id
    pub id: u64,
    /// Ingredient indices to toggle (0-based)
    #[arg(required = true)]
    pub indices: Vec<usize>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Record id
    pub id: u64,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["mixo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mixo", "list", "gin", "--json", "-C", "/tmp/bar"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.catalog_dir.as_deref(), Some("/tmp/bar"));
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.query.as_deref(), Some("gin")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn check_requires_indices() {
        assert!(Cli::try_parse_from(["mixo", "check", "3"]).is_err());
        let cli = Cli::try_parse_from(["mixo", "check", "3", "0", "2"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.id, 3);
                assert_eq!(args.indices, vec![0, 2]);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn show_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["mixo", "show", "negroni"]).is_err());
    }
}
