use anyhow::Result;
use clap::Parser;

use gradebook_cli::cli::{Cli, Commands, handle_import_command};
use gradebook_cli::config::Config;
use gradebook_cli::logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Import(args) => handle_import_command(args, &config).await,
    }
}
