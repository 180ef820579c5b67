//! Commitcrunch CLI entry point.

use clap::Parser;

use commitcrunch::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve(args) => commitcrunch::cli::commands::serve::execute(args, config_path).await,
        Commands::Days(args) => {
            commitcrunch::cli::commands::days::execute(args, cli.json, config_path).await
        }
        Commands::Summary(args) => {
            commitcrunch::cli::commands::summary::execute(args, cli.json, config_path).await
        }
        Commands::Config(command) => {
            commitcrunch::cli::commands::config::execute(command, cli.json, config_path)
        }
    };

    if let Err(err) = result {
        commitcrunch::cli::handle_error(err, cli.json);
    }
}
