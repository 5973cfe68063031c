use anyhow::{Context, Result};
use clap::Args;
use sensequery::api::{SurveyApi, SurveyClient};
use sensequery::config::Config;
use sensequery::survey::SurveyKey;
use sensequery::ui::Spinner;

#[derive(Args)]
pub struct ShowArgs {
    /// Survey key to fetch
    pub key: String,
}

/// Fetch a survey configuration and print it as pretty JSON
pub async fn show_command(args: ShowArgs, config: &Config) -> Result<()> {
    let key = SurveyKey::try_from(args.key)?;
    let client = SurveyClient::new(&config.api).context("Failed to create survey client")?;

    let payload = {
        let _spinner = Spinner::start(format!("Fetching survey {}", key));
        client.fetch_survey_config(&key).await?
    };

    let json = serde_json::to_string_pretty(&payload).context("Failed to serialize survey")?;
    println!("{}", json);
    Ok(())
}
