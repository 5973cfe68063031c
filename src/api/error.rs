//! Failure taxonomy for the survey API boundary

use crate::survey::message::INVALID_KEY_MESSAGE;

/// Errors raised while resolving a survey key or talking to the survey API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// Key missing or blank; nothing can be fetched without a new key
    #[error("{}", INVALID_KEY_MESSAGE)]
    InvalidKey,

    /// Loading the configuration produced a non-success transport outcome
    #[error("Failed to fetch survey data: {0}")]
    FetchTransport(String),

    /// The transport succeeded but the body reports failure
    #[error("{0}")]
    ApiLogic(String),

    /// The body is malformed or lacks the required configuration
    #[error("Invalid survey data received")]
    Validation,

    /// Posting the response produced a non-success transport outcome
    #[error("Failed to submit response: {0}")]
    SubmitTransport(String),
}

impl SurveyError {
    /// Whether the user can recover by retrying the fetch
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SurveyError::InvalidKey)
    }
}
