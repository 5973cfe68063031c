//! Structured request logging with correlation tracking
//!
//! Each API call gets a correlation id so the fetch/submit lifecycle can be
//! followed through the log file. Events are single-line JSON objects.

use log::{debug, error, info, warn};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};

/// The two calls the survey API makes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    FetchSurvey,
    SubmitResponse,
}

impl ApiOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiOperation::FetchSurvey => "fetch_survey",
            ApiOperation::SubmitResponse => "submit_response",
        }
    }
}

/// Structured logger for survey API calls
///
/// With `request_logging` off only failures are written.
#[derive(Debug, Clone)]
pub struct ApiLogger {
    request_logging: bool,
}

/// One in-flight API call
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub correlation_id: String,
    pub operation: ApiOperation,
    pub survey_key: String,
    pub start_time: Instant,
}

impl OperationContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Event body carrying the correlation fields plus `fields`
    fn event(&self, name: &str, fields: Value) -> Value {
        let mut body = Map::new();
        body.insert("event".into(), name.into());
        body.insert("correlation_id".into(), self.correlation_id.clone().into());
        body.insert("operation".into(), self.operation.as_str().into());
        body.insert("survey_key".into(), self.survey_key.clone().into());
        if let Value::Object(extra) = fields {
            body.extend(extra);
        }
        body.insert("timestamp".into(), chrono::Utc::now().to_rfc3339().into());
        Value::Object(body)
    }
}

impl ApiLogger {
    pub fn new(request_logging: bool) -> Self {
        Self { request_logging }
    }

    pub fn quiet() -> Self {
        Self::new(false)
    }

    pub fn begin(&self, operation: ApiOperation, survey_key: &str) -> OperationContext {
        let ctx = OperationContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            operation,
            survey_key: survey_key.to_string(),
            start_time: Instant::now(),
        };

        if self.request_logging {
            info!("survey api: {}", ctx.event("started", json!({})));
        }
        ctx
    }

    pub fn request_sent(&self, ctx: &OperationContext, method: &str, url: &str) {
        if self.request_logging {
            let event = ctx.event("request", json!({ "method": method, "url": url }));
            debug!("survey api: {}", event);
        }
    }

    pub fn response_received(&self, ctx: &OperationContext, status: u16) {
        if !self.request_logging {
            return;
        }

        let event = ctx.event(
            "response",
            json!({ "status": status, "elapsed_ms": ctx.elapsed().as_millis() }),
        );
        if status >= 400 {
            warn!("survey api: {}", event);
        } else {
            debug!("survey api: {}", event);
        }
    }

    /// Close out a call; failures are always logged
    pub fn finish(&self, ctx: &OperationContext, failure: Option<&str>) {
        let event = ctx.event(
            "finished",
            json!({
                "ok": failure.is_none(),
                "error": failure,
                "elapsed_ms": ctx.elapsed().as_millis(),
            }),
        );

        match failure {
            Some(_) => error!("survey api: {}", event),
            None if self.request_logging => info!("survey api: {}", event),
            None => {}
        }
    }
}

impl Default for ApiLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_assigns_correlation_id() {
        let ctx = ApiLogger::default().begin(ApiOperation::FetchSurvey, "k1");

        assert_eq!(ctx.operation, ApiOperation::FetchSurvey);
        assert_eq!(ctx.survey_key, "k1");
        assert!(uuid::Uuid::parse_str(&ctx.correlation_id).is_ok());
    }

    #[test]
    fn test_correlation_ids_are_unique() {
        let logger = ApiLogger::quiet();
        let a = logger.begin(ApiOperation::SubmitResponse, "k");
        let b = logger.begin(ApiOperation::SubmitResponse, "k");
        assert_ne!(a.correlation_id, b.correlation_id);
    }

    #[test]
    fn test_event_shape() {
        let ctx = ApiLogger::quiet().begin(ApiOperation::SubmitResponse, "k");
        let event = ctx.event("response", json!({ "status": 502 }));

        assert_eq!(event["event"], "response");
        assert_eq!(event["operation"], "submit_response");
        assert_eq!(event["survey_key"], "k");
        assert_eq!(event["status"], 502);
        assert!(event["timestamp"].is_string());
    }
}
