use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use is_terminal::IsTerminal;
use log::info;
use sensequery::api::SurveyClient;
use sensequery::config::Config;
use sensequery::context::{ClientContextProvider, NoClientContext, SystemContext, UserAgentContext};
use sensequery::ui::TerminalPresenter;
use sensequery::wizard::SurveyWizard;
use std::sync::Arc;

#[derive(Args)]
pub struct RunArgs {
    /// Survey key to load
    pub key: Option<String>,

    /// Report client details parsed from this user-agent string
    #[arg(long, conflicts_with = "no_telemetry")]
    pub user_agent: Option<String>,

    /// Locale reported with --user-agent (e.g. en-GB)
    #[arg(long, requires = "user_agent")]
    pub locale: Option<String>,

    /// Do not send client details or completion time
    #[arg(long)]
    pub no_telemetry: bool,
}

pub async fn run_command(args: RunArgs, config: &Config) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("'sensequery run' needs an interactive terminal");
    }

    let client = SurveyClient::new(&config.api).context("Failed to create survey client")?;
    let context: Arc<dyn ClientContextProvider> = match (&args.user_agent, args.no_telemetry) {
        (_, true) => Arc::new(NoClientContext),
        (Some(ua), false) => Arc::new(UserAgentContext::new(ua.clone(), args.locale.clone())),
        (None, false) => Arc::new(SystemContext::detect()),
    };

    info!("Starting survey wizard for key {:?}", args.key);
    let wizard = SurveyWizard::new(args.key.as_deref(), Arc::new(client)).with_context(context);

    println!();
    println!("  {}", "📝 Survey".bright_blue().bold());
    println!("  {}", "════════".bright_blue());

    let wizard = TerminalPresenter::new(wizard).run().await?;
    info!(
        "Survey wizard finished on step {:?} (submitted: {})",
        wizard.state().current_step(),
        wizard.state().is_submitted()
    );
    Ok(())
}
