//! Context for the terminal front-end: describes the host it runs on

use super::{ClientContextProvider, ClientMetadata, DeviceClass};

/// Browser family reported for terminal sessions
pub const TERMINAL_CLIENT: &str = "sensequery-cli";

#[derive(Debug, Clone)]
pub struct SystemContext {
    os: &'static str,
    locale: Option<String>,
}

impl SystemContext {
    /// Detect the host operating system and locale from the environment
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| normalize_locale(&value));

        Self {
            os: os_name(std::env::consts::OS),
            locale,
        }
    }

    pub fn with_locale(os: &'static str, locale: Option<String>) -> Self {
        Self { os, locale }
    }
}

impl ClientContextProvider for SystemContext {
    fn client_metadata(&self) -> Option<ClientMetadata> {
        Some(ClientMetadata {
            browser: TERMINAL_CLIENT.to_string(),
            os: self.os.to_string(),
            device: DeviceClass::Desktop,
            locale: self.locale.clone(),
        })
    }
}

fn os_name(target_os: &str) -> &'static str {
    match target_os {
        "windows" => "Windows",
        "macos" => "macOS",
        "ios" => "iOS",
        "android" => "Android",
        "linux" => "Linux",
        _ => "Other",
    }
}

/// `en_US.UTF-8` -> `en-US`; `C` and `POSIX` carry no locale
fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(normalize_locale("fr").as_deref(), Some("fr"));
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_os_name() {
        assert_eq!(os_name("linux"), "Linux");
        assert_eq!(os_name("macos"), "macOS");
        assert_eq!(os_name("freebsd"), "Other");
    }

    #[test]
    fn test_terminal_metadata() {
        let meta = SystemContext::with_locale("Linux", Some("en-US".into()))
            .client_metadata()
            .unwrap();
        assert_eq!(meta.browser, TERMINAL_CLIENT);
        assert_eq!(meta.device, DeviceClass::Desktop);
        assert_eq!(meta.locale.as_deref(), Some("en-US"));
    }
}
