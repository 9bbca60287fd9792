//! Ordered field list shared by every report format.

use serde::{Deserialize, Serialize};

use crate::types::ErrorContext;

/// A scalar fact of an error context, identified independently of any format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    UserAction,
    Request,
    ContentLanguage,
    ContentCountry,
    AppLanguage,
    Service,
    Package,
    Version,
    Os,
    Time,
}

impl FieldKey {
    /// Canonical order, also the JSON key order.
    pub const ALL: [FieldKey; 10] = [
        FieldKey::UserAction,
        FieldKey::Request,
        FieldKey::ContentLanguage,
        FieldKey::ContentCountry,
        FieldKey::AppLanguage,
        FieldKey::Service,
        FieldKey::Package,
        FieldKey::Version,
        FieldKey::Os,
        FieldKey::Time,
    ];

    /// Key used in the JSON report.
    pub fn json_key(&self) -> &'static str {
        match self {
            FieldKey::UserAction => "user_action",
            FieldKey::Request => "request",
            FieldKey::ContentLanguage => "content_language",
            FieldKey::ContentCountry => "content_country",
            FieldKey::AppLanguage => "app_language",
            FieldKey::Service => "service",
            FieldKey::Package => "package",
            FieldKey::Version => "version",
            FieldKey::Os => "os",
            FieldKey::Time => "time",
        }
    }

    pub fn value<'a>(&self, context: &'a ErrorContext) -> &'a str {
        match self {
            FieldKey::UserAction => context.user_action_description(),
            FieldKey::Request => context.request(),
            FieldKey::ContentLanguage => context.content_language_code(),
            FieldKey::ContentCountry => context.content_country_code(),
            FieldKey::AppLanguage => context.app_language_tag(),
            FieldKey::Service => context.service_name(),
            FieldKey::Package => context.package_identifier(),
            FieldKey::Version => context.app_version(),
            FieldKey::Os => context.os_description(),
            FieldKey::Time => context.timestamp(),
        }
    }
}

impl std::str::FromStr for FieldKey {
    type Err = String;

    /// Accepts the JSON key (`user_action`, `os`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|k| k.json_key() == s)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// One labelled value of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportField<'a> {
    pub key: FieldKey,
    pub value: &'a str,
}

/// Field values of `context` in canonical order.
pub fn fields(context: &ErrorContext) -> Vec<ReportField<'_>> {
    FieldKey::ALL
        .into_iter()
        .map(|key| ReportField {
            key,
            value: key.value(context),
        })
        .collect()
}

/// Human-readable field labels.
///
/// Labels are not localized here; a caller that wants another language
/// supplies its own set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub user_action: String,
    pub request: String,
    pub content_language: String,
    pub content_country: String,
    pub app_language: String,
    pub service: String,
    pub package: String,
    pub version: String,
    pub os: String,
    pub time: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            user_action: "User Action".to_string(),
            request: "Request".to_string(),
            content_language: "Content Language".to_string(),
            content_country: "Content Country".to_string(),
            app_language: "App Language".to_string(),
            service: "Service".to_string(),
            package: "Package".to_string(),
            version: "Version".to_string(),
            os: "OS".to_string(),
            time: "Timestamp".to_string(),
        }
    }
}

impl Labels {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::UserAction => &self.user_action,
            FieldKey::Request => &self.request,
            FieldKey::ContentLanguage => &self.content_language,
            FieldKey::ContentCountry => &self.content_country,
            FieldKey::AppLanguage => &self.app_language,
            FieldKey::Service => &self.service,
            FieldKey::Package => &self.package,
            FieldKey::Version => &self.version,
            FieldKey::Os => &self.os,
            FieldKey::Time => &self.time,
        }
    }

    pub fn set(&mut self, key: FieldKey, label: String) {
        let slot = match key {
            FieldKey::UserAction => &mut self.user_action,
            FieldKey::Request => &mut self.request,
            FieldKey::ContentLanguage => &mut self.content_language,
            FieldKey::ContentCountry => &mut self.content_country,
            FieldKey::AppLanguage => &mut self.app_language,
            FieldKey::Service => &mut self.service,
            FieldKey::Package => &mut self.package,
            FieldKey::Version => &mut self.version,
            FieldKey::Os => &mut self.os,
            FieldKey::Time => &mut self.time,
        };
        *slot = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_canonical_order() {
        let ctx = ErrorContext::builder()
            .user_action("search")
            .os("Linux")
            .timestamp("t0")
            .build();
        let fields = fields(&ctx);

        assert_eq!(fields.len(), FieldKey::ALL.len());
        assert_eq!(fields[0].key, FieldKey::UserAction);
        assert_eq!(fields[0].value, "search");
        assert_eq!(fields[8].value, "Linux");
        assert_eq!(fields[9].key, FieldKey::Time);
        assert_eq!(fields[9].value, "t0");
    }

    #[test]
    fn test_field_key_from_str() {
        assert_eq!("os".parse::<FieldKey>(), Ok(FieldKey::Os));
        assert_eq!("user_action".parse::<FieldKey>(), Ok(FieldKey::UserAction));
        assert!("timestamp".parse::<FieldKey>().is_err());
    }

    #[test]
    fn test_labels_set_and_get() {
        let mut labels = Labels::default();
        assert_eq!(labels.get(FieldKey::Time), "Timestamp");

        labels.set(FieldKey::Service, "Dienst".to_string());
        assert_eq!(labels.get(FieldKey::Service), "Dienst");
    }

    #[test]
    fn test_partial_labels_deserialize() {
        let labels: Labels = toml::from_str("os = \"System\"").unwrap();
        assert_eq!(labels.os, "System");
        assert_eq!(labels.request, "Request");
    }
}
