//! User-agent based client detection

use super::{ClientContextProvider, ClientMetadata, DeviceClass};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN: &str = "Other";

// Order matters: Edge and Opera also advertise Chrome, Chrome advertises Safari.
const BROWSER_PATTERNS: &[(&str, &str)] = &[
    ("Edge", r"Edg(e|A|iOS)?/"),
    ("Opera", r"OPR/|Opera"),
    ("Firefox", r"Firefox/|FxiOS/"),
    ("Chrome", r"Chrome/|CriOS/"),
    ("Safari", r"Version/[\d.]+.*Safari/"),
    ("Internet Explorer", r"MSIE |Trident/"),
];

const OS_PATTERNS: &[(&str, &str)] = &[
    ("Windows", r"Windows NT|Win64|Win32"),
    ("iOS", r"iPhone|iPad|iPod"),
    ("Android", r"Android"),
    ("macOS", r"Mac OS X|Macintosh"),
    ("Linux", r"Linux|X11"),
];

// Android tablets drop the "Mobile" token, so bare Android comes last.
const DEVICE_PATTERNS: &[(DeviceClass, &str)] = &[
    (DeviceClass::Tablet, r"(?i)iPad|Tablet|PlayBook|Silk/"),
    (DeviceClass::Mobile, r"(?i)Mobi|iPhone|iPod"),
    (DeviceClass::Tablet, r"Android"),
];

static BROWSERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile(BROWSER_PATTERNS));
static OPERATING_SYSTEMS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile(OS_PATTERNS));
static DEVICES: Lazy<Vec<(DeviceClass, Regex)>> = Lazy::new(|| compile(DEVICE_PATTERNS));

/// Compile a detection table; a pattern that fails to compile is logged and skipped
fn compile<T: Copy>(patterns: &[(T, &str)]) -> Vec<(T, Regex)> {
    patterns
        .iter()
        .filter_map(|&(label, pattern)| match Regex::new(pattern) {
            Ok(re) => Some((label, re)),
            Err(e) => {
                log::error!("Invalid user-agent pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Metadata derived from a user-agent string and an optional locale
#[derive(Debug, Clone)]
pub struct UserAgentContext {
    user_agent: String,
    locale: Option<String>,
}

impl UserAgentContext {
    pub fn new(user_agent: impl Into<String>, locale: Option<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            locale,
        }
    }

    pub fn browser(&self) -> &'static str {
        first_match(&BROWSERS, &self.user_agent).unwrap_or(UNKNOWN)
    }

    pub fn os(&self) -> &'static str {
        let ua = &self.user_agent;
        first_match(&OPERATING_SYSTEMS, ua).unwrap_or(UNKNOWN)
    }

    pub fn device(&self) -> DeviceClass {
        let ua = &self.user_agent;
        first_match(&DEVICES, ua).unwrap_or(DeviceClass::Desktop)
    }
}

impl ClientContextProvider for UserAgentContext {
    fn client_metadata(&self) -> Option<ClientMetadata> {
        if self.user_agent.trim().is_empty() {
            return None;
        }

        Some(ClientMetadata {
            browser: self.browser().to_string(),
            os: self.os().to_string(),
            device: self.device(),
            locale: self.locale.clone(),
        })
    }
}

fn first_match<T: Copy>(table: &[(T, Regex)], ua: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, re)| re.is_match(ua))
        .map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const SAFARI_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const FIREFOX_LINUX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const CHROME_ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(BROWSERS.len(), 6);
        assert_eq!(OPERATING_SYSTEMS.len(), 5);
        assert_eq!(DEVICES.len(), 3);
        assert_eq!(BROWSERS.len(), BROWSER_PATTERNS.len());
        assert_eq!(OPERATING_SYSTEMS.len(), OS_PATTERNS.len());
        assert_eq!(DEVICES.len(), DEVICE_PATTERNS.len());
    }

    #[test]
    fn test_compile_skips_invalid_pattern() {
        let table = compile(&[("ok", r"abc"), ("broken", r"(unclosed")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].0, "ok");
    }

    #[test]
    fn test_browser_detection() {
        let browser = |ua: &str| UserAgentContext::new(ua, None).browser();

        assert_eq!(browser(CHROME_WINDOWS), "Chrome");
        assert_eq!(browser(EDGE_WINDOWS), "Edge");
        assert_eq!(browser(SAFARI_IPHONE), "Safari");
        assert_eq!(browser(FIREFOX_LINUX), "Firefox");
        assert_eq!(browser("curl/8.0"), UNKNOWN);
    }

    #[test]
    fn test_os_detection() {
        let os = |ua: &str| UserAgentContext::new(ua, None).os();

        assert_eq!(os(CHROME_WINDOWS), "Windows");
        assert_eq!(os(SAFARI_IPHONE), "iOS");
        assert_eq!(os(CHROME_ANDROID), "Android");
        assert_eq!(os(FIREFOX_LINUX), "Linux");
    }

    #[test]
    fn test_device_detection() {
        let device = |ua: &str| UserAgentContext::new(ua, None).device();

        assert_eq!(device(CHROME_WINDOWS), DeviceClass::Desktop);
        assert_eq!(device(SAFARI_IPHONE), DeviceClass::Mobile);
        assert_eq!(device(SAFARI_IPAD), DeviceClass::Tablet);
        assert_eq!(device(CHROME_ANDROID), DeviceClass::Mobile);
        assert_eq!(device(ANDROID_TABLET), DeviceClass::Tablet);
    }

    #[test]
    fn test_metadata_includes_locale() {
        let ctx = UserAgentContext::new(FIREFOX_LINUX, Some("en-GB".into()));
        let meta = ctx.client_metadata().unwrap();
        assert_eq!(meta.locale.as_deref(), Some("en-GB"));
        assert_eq!(meta.device, DeviceClass::Desktop);
    }

    #[test]
    fn test_blank_user_agent_yields_nothing() {
        let ctx = UserAgentContext::new("  ", None);
        assert!(ctx.client_metadata().is_none());
    }
}
