use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use log::info;
use sensequery::config::{Config, SETTING_NAMES};

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show current settings
    Show,
    /// Get the value of a specific setting
    Get {
        /// Setting name
        name: String,
    },
    /// Set the value of a specific setting
    Set {
        /// Setting name
        name: String,
        /// Setting value
        value: String,
    },
    /// Reset a setting to its default value
    Reset {
        /// Setting name
        name: String,
    },
}

/// Config subcommands operate on the stored file, without environment overrides
pub async fn config_command(args: ConfigCommands) -> Result<()> {
    let path = Config::get_config_path()?;
    let mut config = Config::load_from(&path)?;

    match args.command {
        ConfigSubcommands::Show => {
            println!(
                "  {} {}",
                "Config file:".dimmed(),
                path.display().to_string().cyan()
            );
            for name in SETTING_NAMES {
                println!("  {}: {}", name.bright_white(), config.get_setting(name)?);
            }
        }
        ConfigSubcommands::Get { name } => {
            println!("{}", config.get_setting(&name)?);
        }
        ConfigSubcommands::Set { name, value } => {
            config.set_setting(&name, &value)?;
            config.save_to(&path)?;
            info!("Updated setting {}", name);
            println!("  {} {} = {}", "✓".bright_green(), name, value);
        }
        ConfigSubcommands::Reset { name } => {
            config.reset_setting(&name)?;
            config.save_to(&path)?;
            println!(
                "  {} {} = {}",
                "✓".bright_green(),
                name,
                config.get_setting(&name)?
            );
        }
    }

    Ok(())
}
