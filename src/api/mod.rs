//! Survey API module
//!
//! Survey Fetcher and Response Submitter: wire models, the failure taxonomy,
//! the `SurveyApi` seam the wizard depends on and its reqwest implementation.

pub mod client;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;

pub use client::{SurveyApi, SurveyClient};
pub use error::SurveyError;
pub use logging::{ApiLogger, ApiOperation, OperationContext};
pub use models::{Category, RespondentDetailField, SubmissionPayload, SurveyConfig, SurveyPayload};
