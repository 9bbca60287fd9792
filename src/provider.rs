//! Environment facts that go into an error context.
//!
//! Locale, build identity and OS string are process-wide in most
//! applications. They are read through [`ContextProvider`] so report
//! building stays a pure function of its arguments.

use chrono::{Local, SecondsFormat};
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Placeholder for locale facts that could not be determined.
pub const UNKNOWN: &str = "none";

/// Supplies the already-resolved environment strings of an error context.
pub trait ContextProvider {
    fn content_language_code(&self) -> String;
    fn content_country_code(&self) -> String;
    fn app_language_tag(&self) -> String;
    fn package_identifier(&self) -> String;
    fn app_version(&self) -> String;
    fn os_description(&self) -> String;

    /// Current time as an ISO-8601 offset timestamp.
    fn now(&self) -> String;
}

/// Reads locale from the OS and build identity from this crate.
#[derive(Debug, Clone)]
pub struct SystemContextProvider {
    package: String,
    version: String,
    locale: Option<LanguageIdentifier>,
}

impl Default for SystemContextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemContextProvider {
    pub fn new() -> Self {
        let raw = sys_locale::get_locale();
        let locale = raw.as_deref().and_then(parse_locale);
        debug!(locale = ?raw, parsed = locale.is_some(), "resolved system locale");

        Self {
            package: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            locale,
        }
    }

    /// Report a different package identifier (the application that failed).
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Parse a POSIX or BCP-47 locale string such as `en_US.UTF-8` or `de-AT`.
fn parse_locale(raw: &str) -> Option<LanguageIdentifier> {
    let tag = raw.split(['.', '@']).next()?.replace('_', "-");
    tag.parse().ok()
}

impl ContextProvider for SystemContextProvider {
    fn content_language_code(&self) -> String {
        self.locale
            .as_ref()
            .map(|l| l.language.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn content_country_code(&self) -> String {
        self.locale
            .as_ref()
            .and_then(|l| l.region)
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn app_language_tag(&self) -> String {
        self.locale
            .as_ref()
            .map(|l| l.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn package_identifier(&self) -> String {
        self.package.clone()
    }

    fn app_version(&self) -> String {
        self.version.clone()
    }

    fn os_description(&self) -> String {
        format!(
            "{} {} - {}",
            std::env::consts::OS,
            std::env::consts::FAMILY,
            std::env::consts::ARCH
        )
    }

    fn now(&self) -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
    }
}

/// Fixed values, for embedders that resolve everything up front and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContextProvider {
    pub content_language_code: String,
    pub content_country_code: String,
    pub app_language_tag: String,
    pub package_identifier: String,
    pub app_version: String,
    pub os_description: String,
    pub timestamp: String,
}

impl Default for StaticContextProvider {
    fn default() -> Self {
        Self {
            content_language_code: "en".to_string(),
            content_country_code: "US".to_string(),
            app_language_tag: "en-US".to_string(),
            package_identifier: "org.example.app".to_string(),
            app_version: "1.2.3".to_string(),
            os_description: "Linux Android 13 - 33".to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }
}

impl ContextProvider for StaticContextProvider {
    fn content_language_code(&self) -> String {
        self.content_language_code.clone()
    }

    fn content_country_code(&self) -> String {
        self.content_country_code.clone()
    }

    fn app_language_tag(&self) -> String {
        self.app_language_tag.clone()
    }

    fn package_identifier(&self) -> String {
        self.package_identifier.clone()
    }

    fn app_version(&self) -> String {
        self.app_version.clone()
    }

    fn os_description(&self) -> String {
        self.os_description.clone()
    }

    fn now(&self) -> String {
        self.timestamp.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        let l = parse_locale("en_US.UTF-8").unwrap();
        assert_eq!(l.language.to_string(), "en");
        assert_eq!(l.region.map(|r| r.to_string()), Some("US".to_string()));

        let l = parse_locale("de-AT").unwrap();
        assert_eq!(l.to_string(), "de-AT");

        let l = parse_locale("fr").unwrap();
        assert!(l.region.is_none());

        assert!(parse_locale("!!").is_none());
    }

    #[test]
    fn test_system_provider_without_locale() {
        let provider = SystemContextProvider {
            package: "pkg".to_string(),
            version: "0.0.1".to_string(),
            locale: None,
        };
        assert_eq!(provider.content_language_code(), UNKNOWN);
        assert_eq!(provider.content_country_code(), UNKNOWN);
        assert_eq!(provider.app_language_tag(), UNKNOWN);
    }

    #[test]
    fn test_system_provider_overrides() {
        let provider = SystemContextProvider::new()
            .with_package("org.example.app")
            .with_version("9.9.9");
        assert_eq!(provider.package_identifier(), "org.example.app");
        assert_eq!(provider.app_version(), "9.9.9");
        assert!(provider.os_description().contains(std::env::consts::OS));
    }

    #[test]
    fn test_system_provider_timestamp_is_offset_iso8601() {
        let ts = SystemContextProvider::new().now();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(!ts.ends_with('Z'));
    }
}
