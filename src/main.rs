use anyhow::Result;
use clap::Parser;
use log::info;
use sensequery::config::{Config, EndpointFlags};

mod cli;

use cli::commands::{config_command, run_command, show_command};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("sensequery.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting sensequery");

    let flags = EndpointFlags {
        survey_url: cli.survey_url,
        response_url: cli.response_url,
    };

    match cli.command {
        Commands::Config(args) => config_command(args).await,
        Commands::Run(args) => run_command(args, &Config::load_with_flags(flags)?).await,
        Commands::Show(args) => show_command(args, &Config::load_with_flags(flags)?).await,
    }
}
