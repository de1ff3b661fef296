//! Command-line interface definitions

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::import::{ImportCommands, handle_import_command};

#[derive(Parser, Debug)]
#[command(name = "gradebook-cli", version, about = "Import class rosters into normalized student records")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import one or more roster spreadsheets
    Import(ImportCommands),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_parse_import() {
        let cli = Cli::parse_from([
            "gradebook-cli",
            "-vv",
            "import",
            "a.xlsx",
            "b.csv",
            "--format",
            "json",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Import(args) = cli.command;
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_import_requires_a_file() {
        assert!(Cli::try_parse_from(["gradebook-cli", "import"]).is_err());
    }
}
