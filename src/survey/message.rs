//! Display strings and error-to-message formatting
//!
//! Every failure that reaches the wizard is turned into a plain string here,
//! so the presentation layer never has to inspect error types.

use crate::api::error::SurveyError;

pub const INVALID_KEY_MESSAGE: &str = "Please provide a valid survey key";
pub const LOADING_MESSAGE: &str = "Loading survey...";
pub const NO_CONFIGURATION_MESSAGE: &str = "No survey configuration found";
pub const RETRY_LABEL: &str = "Try again";

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";
pub const FETCH_FAILED: &str = "Failed to fetch survey data";
pub const SUBMIT_FAILED: &str = "Failed to submit response";

/// Something that may carry a displayable failure message
///
/// Returns `None` when there is no usable message, in which case the caller's
/// fallback is shown instead.
pub trait ErrorMessage {
    fn error_message(&self) -> Option<String>;
}

impl ErrorMessage for str {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorMessage for String {
    fn error_message(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ErrorMessage for SurveyError {
    fn error_message(&self) -> Option<String> {
        non_empty(self.to_string())
    }
}

impl ErrorMessage for anyhow::Error {
    fn error_message(&self) -> Option<String> {
        non_empty(self.to_string())
    }
}

impl<T: ErrorMessage + ?Sized> ErrorMessage for &T {
    fn error_message(&self) -> Option<String> {
        (**self).error_message()
    }
}

impl<T: ErrorMessage> ErrorMessage for Option<T> {
    fn error_message(&self) -> Option<String> {
        self.as_ref().and_then(ErrorMessage::error_message)
    }
}

/// Turn an arbitrary failure value into a display string
///
/// Strings are used verbatim, errors contribute their message, and anything
/// else (an absent value, an error with an empty message) yields `fallback`.
pub fn format_error_message<E: ErrorMessage + ?Sized>(error: &E, fallback: &str) -> String {
    error.error_message().unwrap_or_else(|| fallback.to_string())
}

fn non_empty(message: String) -> Option<String> {
    if message.is_empty() { None } else { Some(message) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_are_used_verbatim() {
        assert_eq!(format_error_message("boom", UNKNOWN_ERROR), "boom");
        assert_eq!(format_error_message(&String::from(""), UNKNOWN_ERROR), "");
    }

    #[test]
    fn test_errors_use_their_message() {
        let err = SurveyError::FetchTransport("Not Found".to_string());
        assert_eq!(
            format_error_message(&err, FETCH_FAILED),
            "Failed to fetch survey data: Not Found"
        );

        let err = anyhow::anyhow!("connection reset");
        assert_eq!(
            format_error_message(&err, SUBMIT_FAILED),
            "connection reset"
        );
    }

    #[test]
    fn test_absent_value_falls_back() {
        let none: Option<String> = None;
        assert_eq!(format_error_message(&none, UNKNOWN_ERROR), UNKNOWN_ERROR);
        assert_eq!(format_error_message(&none, FETCH_FAILED), FETCH_FAILED);
    }

    #[test]
    fn test_empty_error_message_falls_back() {
        let err = anyhow::anyhow!("");
        assert_eq!(format_error_message(&err, SUBMIT_FAILED), SUBMIT_FAILED);
    }
}
