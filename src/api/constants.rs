//! API constants and endpoint builders for the survey service

/// Default base for `GET {base}/{key}`
pub const DEFAULT_SURVEY_BASE_URL: &str = "http://localhost:4444/v1/public/surveys/sensequery";

/// Default endpoint for `POST` of responses
pub const DEFAULT_RESPONSE_BASE_URL: &str = "http://localhost:4444/v1/public/responses/sensequery";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("sensequery/", env!("CARGO_PKG_VERSION"));

/// Standard headers for survey requests
pub mod headers {
    /// Accept header for JSON responses
    pub const ACCEPT_JSON: &str = "application/json";
}

/// HTTP methods used by the client
pub mod methods {
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
}

/// Build the retrieval URL for a survey key
///
/// The key is percent-encoded as a single path segment; a trailing slash on
/// the base is tolerated.
pub fn survey_endpoint(base_url: &str, survey_key: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(survey_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_endpoint_joins_key() {
        assert_eq!(
            survey_endpoint("https://api.example.com/surveys", "abc-123"),
            "https://api.example.com/surveys/abc-123"
        );
    }

    #[test]
    fn test_survey_endpoint_trims_trailing_slash() {
        assert_eq!(
            survey_endpoint("https://api.example.com/surveys/", "k"),
            "https://api.example.com/surveys/k"
        );
    }

    #[test]
    fn test_survey_endpoint_encodes_key() {
        assert_eq!(
            survey_endpoint("http://h/s", "a b/c"),
            "http://h/s/a%20b%2Fc"
        );
    }
}
