//! Wire types for the survey API
//!
//! The fetch envelope is decoded leniently into optional fields first and then
//! checked explicitly, so a missing question surfaces as
//! [`SurveyError::Validation`] rather than a serde message.

use crate::api::error::SurveyError;
use crate::context::ClientMetadata;
use crate::survey::SurveyKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback when the API reports failure without a message
pub const DEFAULT_API_ERROR: &str = "API returned an error";

/// A selectable category option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub value: String,
}

/// One extra input collected from the respondent; `value` is the field id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentDetailField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyConfig {
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub thank_you_message: String,
}

impl SurveyConfig {
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn category(&self, value: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.value == value)
    }
}

/// Full result of a successful fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPayload {
    pub config: SurveyConfig,
    #[serde(default)]
    pub respondent_details: Vec<RespondentDetailField>,
}

impl SurveyPayload {
    pub fn has_respondent_details(&self) -> bool {
        !self.respondent_details.is_empty()
    }

    pub fn respondent_field(&self, id: &str) -> Option<&RespondentDetailField> {
        self.respondent_details.iter().find(|f| f.value == id)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    payload: Option<RawPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default)]
    config: Option<RawConfig>,
    #[serde(default)]
    respondent_details: Option<Vec<RespondentDetailField>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    categories: Option<Vec<Category>>,
    #[serde(default)]
    thank_you_message: Option<String>,
}

/// Decode a fetch response body that arrived with a success status
pub fn decode_survey_body(body: &[u8]) -> Result<SurveyPayload, SurveyError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
        log::debug!("Survey body is not a valid envelope: {}", e);
        SurveyError::Validation
    })?;

    if envelope.success == Some(false) {
        let message = envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
        return Err(SurveyError::ApiLogic(message));
    }

    let payload = envelope.payload.ok_or(SurveyError::Validation)?;
    let config = payload.config.ok_or(SurveyError::Validation)?;
    let question = config
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or(SurveyError::Validation)?;

    Ok(SurveyPayload {
        config: SurveyConfig {
            question,
            categories: config.categories.unwrap_or_default(),
            thank_you_message: config.thank_you_message.unwrap_or_default(),
        },
        respondent_details: payload.respondent_details.unwrap_or_default(),
    })
}

/// Body posted to the response endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub survey_key: SurveyKey,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub respondent_details: BTreeMap<String, String>,
    #[serde(flatten)]
    pub client: Option<ClientMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u64>,
}
