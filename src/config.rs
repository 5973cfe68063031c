use crate::api::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_RESPONSE_BASE_URL, DEFAULT_SURVEY_BASE_URL,
    DEFAULT_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SURVEY_URL: &str = "SENSEQUERY_SURVEY_URL";
pub const ENV_RESPONSE_URL: &str = "SENSEQUERY_RESPONSE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SENSEQUERY_TIMEOUT_SECS";

/// Names accepted by `config get/set/reset`
pub const SETTING_NAMES: &[&str] = &[
    "survey-url",
    "response-url",
    "timeout-secs",
    "connect-timeout-secs",
    "request-logging",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_survey_base_url")]
    pub survey_base_url: String,
    #[serde(default = "default_response_base_url")]
    pub response_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_logging")]
    pub request_logging: bool,
}

fn default_survey_base_url() -> String {
    DEFAULT_SURVEY_BASE_URL.to_string()
}

fn default_response_base_url() -> String {
    DEFAULT_RESPONSE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_logging() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            survey_base_url: default_survey_base_url(),
            response_base_url: default_response_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_logging: default_request_logging(),
        }
    }
}

/// Endpoint overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct EndpointFlags {
    pub survey_url: Option<String>,
    pub response_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("sensequery")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".sensequery")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, then apply `.env` and environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::get_config_path()?)?;
        dotenvy::dotenv().ok();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Stored config, then environment, then command-line flags
    pub fn load_with_flags(flags: EndpointFlags) -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_flags(flags);
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config: survey endpoint {}",
            config.api.survey_base_url
        );
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).with_context(|| {
                    format!("Failed to create config directory: {:?}", config_dir)
                })?;
                info!("Created config directory: {:?}", config_dir);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Apply overrides from an environment-like lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SURVEY_URL) {
            debug!("Survey endpoint overridden by {}", ENV_SURVEY_URL);
            self.api.survey_base_url = url;
        }
        if let Some(url) = lookup(ENV_RESPONSE_URL) {
            debug!("Response endpoint overridden by {}", ENV_RESPONSE_URL);
            self.api.response_base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let message = format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS);
            self.api.timeout_secs = secs.trim().parse().context(message)?;
        }
        Ok(())
    }

    /// Apply command-line endpoint flags; these take precedence over everything else
    pub fn apply_flags(&mut self, flags: EndpointFlags) {
        if let Some(url) = flags.survey_url {
            debug!("Survey endpoint overridden by --survey-url");
            self.api.survey_base_url = url;
        }
        if let Some(url) = flags.response_url {
            debug!("Response endpoint overridden by --response-url");
            self.api.response_base_url = url;
        }
    }

    pub fn get_setting(&self, name: &str) -> Result<String> {
        let value = match name {
            "survey-url" => self.api.survey_base_url.clone(),
            "response-url" => self.api.response_base_url.clone(),
            "timeout-secs" => self.api.timeout_secs.to_string(),
            "connect-timeout-secs" => self.api.connect_timeout_secs.to_string(),
            "request-logging" => self.api.request_logging.to_string(),
            _ => anyhow::bail!("Unknown setting: {}", name),
        };
        Ok(value)
    }

    pub fn set_setting(&mut self, name: &str, value: &str) -> Result<()> {
        info!("Setting {} = {}", name, value);
        match name {
            "survey-url" => self.api.survey_base_url = non_blank(name, value)?,
            "response-url" => self.api.response_base_url = non_blank(name, value)?,
            "timeout-secs" => self.api.timeout_secs = parse_value(name, value)?,
            "connect-timeout-secs" => self.api.connect_timeout_secs = parse_value(name, value)?,
            "request-logging" => self.api.request_logging = parse_value(name, value)?,
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        Ok(())
    }

    pub fn reset_setting(&mut self, name: &str) -> Result<()> {
        let defaults = ApiConfig::default();
        match name {
            "survey-url" => self.api.survey_base_url = defaults.survey_base_url,
            "response-url" => self.api.response_base_url = defaults.response_base_url,
            "timeout-secs" => self.api.timeout_secs = defaults.timeout_secs,
            "connect-timeout-secs" => self.api.connect_timeout_secs = defaults.connect_timeout_secs,
            "request-logging" => self.api.request_logging = defaults.request_logging,
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        info!("Reset {} to default", name);
        Ok(())
    }
}

fn non_blank(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("Setting {} cannot be empty", name);
    }
    Ok(value.to_string())
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", name, value))
}
