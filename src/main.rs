//! Profile lookup CLI entry point.

use clap::Parser;

use profile_lookup::cli::{Cli, Commands};
use profile_lookup::infrastructure::config::ConfigLoader;
use profile_lookup::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => profile_lookup::cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => profile_lookup::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Lookup(args) => {
            profile_lookup::cli::commands::lookup::execute(args, &config, cli.json).await
        }
        Commands::Serve(args) => profile_lookup::cli::commands::serve::execute(args, &config).await,
    };

    if let Err(err) = result {
        profile_lookup::cli::handle_error(err, cli.json);
    }
}
