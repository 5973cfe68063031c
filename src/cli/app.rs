use super::commands::config::ConfigCommands;
use super::commands::run::RunArgs;
use super::commands::show::ShowArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sensequery")]
#[command(about = "Answer a survey from the terminal")]
#[command(version)]
pub struct Cli {
    /// Override the survey endpoint base URL
    #[arg(long, global = true)]
    pub survey_url: Option<String>,

    /// Override the response endpoint URL
    #[arg(long, global = true)]
    pub response_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through a survey interactively
    Run(RunArgs),
    /// Fetch a survey configuration and print it as JSON
    Show(ShowArgs),
    /// Configuration management
    Config(ConfigCommands),
}
