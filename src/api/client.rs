use crate::api::constants::{USER_AGENT, headers, methods, survey_endpoint};
use crate::api::error::SurveyError;
use crate::api::logging::{ApiLogger, ApiOperation, OperationContext};
use crate::api::models::{SubmissionPayload, SurveyPayload, decode_survey_body};
use crate::config::ApiConfig;
use crate::survey::SurveyKey;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use std::time::Duration;

/// The two network boundaries the wizard depends on
///
/// Implementations must not touch wizard state; the caller applies results.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// Retrieve the survey configuration for a key
    async fn fetch_survey_config(&self, key: &SurveyKey) -> Result<SurveyPayload, SurveyError>;

    /// Post an assembled response
    async fn submit_response(&self, payload: &SubmissionPayload) -> Result<(), SurveyError>;
}

/// HTTP client for the survey service with connection pooling
#[derive(Debug, Clone)]
pub struct SurveyClient {
    http_client: reqwest::Client,
    survey_base_url: String,
    response_base_url: String,
    logger: ApiLogger,
}

impl SurveyClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(config, http_client))
    }

    /// Create a client around a preconfigured `reqwest::Client`
    pub fn with_custom_client(config: &ApiConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            survey_base_url: config.survey_base_url.clone(),
            response_base_url: config.response_base_url.clone(),
            logger: ApiLogger::new(config.request_logging),
        }
    }

    pub fn survey_url(&self, key: &SurveyKey) -> String {
        survey_endpoint(&self.survey_base_url, key.as_str())
    }

    async fn get_survey(
        &self,
        url: &str,
        ctx: &OperationContext,
    ) -> Result<SurveyPayload, SurveyError> {
        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, headers::ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| SurveyError::FetchTransport(e.to_string()))?;

        let status = response.status();
        self.logger.response_received(ctx, status.as_u16());
        if !status.is_success() {
            return Err(SurveyError::FetchTransport(status_text(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SurveyError::FetchTransport(e.to_string()))?;

        decode_survey_body(&body)
    }

    async fn post_response(
        &self,
        payload: &SubmissionPayload,
        ctx: &OperationContext,
    ) -> Result<(), SurveyError> {
        let response = self
            .http_client
            .post(&self.response_base_url)
            .header(ACCEPT, headers::ACCEPT_JSON)
            .json(payload)
            .send()
            .await
            .map_err(|e| SurveyError::SubmitTransport(e.to_string()))?;

        let status = response.status();
        self.logger.response_received(ctx, status.as_u16());
        if !status.is_success() {
            return Err(SurveyError::SubmitTransport(status_text(status)));
        }

        Ok(())
    }
}

#[async_trait]
impl SurveyApi for SurveyClient {
    async fn fetch_survey_config(&self, key: &SurveyKey) -> Result<SurveyPayload, SurveyError> {
        let url = self.survey_url(key);
        let ctx = self.logger.begin(ApiOperation::FetchSurvey, key.as_str());
        self.logger.request_sent(&ctx, methods::GET, &url);

        let result = self.get_survey(&url, &ctx).await;
        let failure = result.as_ref().err().map(ToString::to_string);
        self.logger.finish(&ctx, failure.as_deref());
        result
    }

    async fn submit_response(&self, payload: &SubmissionPayload) -> Result<(), SurveyError> {
        let key = payload.survey_key.as_str();
        let ctx = self.logger.begin(ApiOperation::SubmitResponse, key);
        let url = &self.response_base_url;
        self.logger.request_sent(&ctx, methods::POST, url);

        let result = self.post_response(payload, &ctx).await;
        let failure = result.as_ref().err().map(ToString::to_string);
        self.logger.finish(&ctx, failure.as_deref());
        result
    }
}

/// Reason phrase for a status, e.g. `Not Found`; the numeric code otherwise
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
