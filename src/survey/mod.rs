//! Survey identity and user-facing messages
//!
//! Leaf helpers shared by the API client, the wizard and the terminal front-end.

pub mod key;
pub mod message;

pub use key::{SurveyKey, is_valid_key};
pub use message::{ErrorMessage, format_error_message};
