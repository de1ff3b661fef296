//! `import` command arguments

mod handler;

use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

pub use handler::handle_import_command;

#[derive(Args, Debug)]
pub struct ImportCommands {
    /// Roster files (xlsx, xlsm, xlsb, xls, ods or csv)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format (defaults to the config value, then table)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
