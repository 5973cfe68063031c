use crate::api::error::SurveyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Check whether a survey key is usable
///
/// A key is valid when it is present and has at least one non-whitespace
/// character. Internal whitespace is allowed.
pub fn is_valid_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| !k.trim().is_empty())
}

/// Opaque, non-empty survey identifier
///
/// Holds the key exactly as supplied; validation only looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyKey(String);

impl SurveyKey {
    /// Validate and wrap a raw key
    pub fn parse(key: Option<&str>) -> Result<Self, SurveyError> {
        match key {
            Some(k) if is_valid_key(Some(k)) => Ok(Self(k.to_string())),
            _ => Err(SurveyError::InvalidKey),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SurveyKey {
    type Error = SurveyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(Some(value))
    }
}

impl TryFrom<String> for SurveyKey {
    type Error = SurveyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_key(Some(&value)) {
            Ok(Self(value))
        } else {
            Err(SurveyError::InvalidKey)
        }
    }
}

impl AsRef<str> for SurveyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_invalid() {
        assert!(!is_valid_key(None));
    }

    #[test]
    fn test_empty_and_blank_keys_are_invalid() {
        assert!(!is_valid_key(Some("")));
        assert!(!is_valid_key(Some("   ")));
        assert!(!is_valid_key(Some("\t\n ")));
    }

    #[test]
    fn test_non_blank_keys_are_valid() {
        assert!(is_valid_key(Some("valid-key")));
        assert!(is_valid_key(Some("  padded  ")));
        assert!(is_valid_key(Some("has inner space")));
    }

    #[test]
    fn test_parse_keeps_key_verbatim() {
        let key = SurveyKey::parse(Some(" abc ")).unwrap();
        assert_eq!(key.as_str(), " abc ");
        assert_eq!(key.to_string(), " abc ");
    }

    #[test]
    fn test_parse_rejects_blank() {
        let blank = SurveyKey::parse(Some("  "));
        assert!(matches!(blank, Err(SurveyError::InvalidKey)));
        let missing = SurveyKey::parse(None);
        assert!(matches!(missing, Err(SurveyError::InvalidKey)));
        assert!(SurveyKey::try_from(String::new()).is_err());
        assert!(SurveyKey::try_from("k-1").is_ok());
    }
}
