use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::provider::ContextProvider;

/// Service name used when the failure is not tied to any backend.
pub const NO_SERVICE: &str = "none";

/// Diagnostic facts about one failure occurrence.
///
/// Built once when the failure is caught and never mutated afterwards. The
/// timestamp is stamped at construction so that every report rendered from
/// the same context describes the same instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    user_action_description: String,
    request: String,
    content_language_code: String,
    content_country_code: String,
    app_language_tag: String,
    service_name: String,
    package_identifier: String,
    app_version: String,
    os_description: String,
    timestamp: String,
    #[serde(default)]
    stack_traces: Vec<String>,
}

impl ErrorContext {
    pub fn builder() -> ErrorContextBuilder {
        ErrorContextBuilder::default()
    }

    /// Capture a context using the environment facts of `provider`.
    ///
    /// The provider is queried exactly once per field, including `now()`.
    pub fn capture<P: ContextProvider + ?Sized>(
        provider: &P,
        user_action: impl Into<String>,
        request: impl Into<String>,
        service: impl Into<String>,
        stack_traces: Vec<String>,
    ) -> Self {
        Self {
            user_action_description: user_action.into(),
            request: request.into(),
            content_language_code: provider.content_language_code(),
            content_country_code: provider.content_country_code(),
            app_language_tag: provider.app_language_tag(),
            service_name: service.into(),
            package_identifier: provider.package_identifier(),
            app_version: provider.app_version(),
            os_description: provider.os_description(),
            timestamp: provider.now(),
            stack_traces,
        }
    }

    pub fn user_action_description(&self) -> &str {
        &self.user_action_description
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn content_language_code(&self) -> &str {
        &self.content_language_code
    }

    pub fn content_country_code(&self) -> &str {
        &self.content_country_code
    }

    pub fn app_language_tag(&self) -> &str {
        &self.app_language_tag
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn package_identifier(&self) -> &str {
        &self.package_identifier
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn os_description(&self) -> &str {
        &self.os_description
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn stack_traces(&self) -> &[String] {
        &self.stack_traces
    }
}

/// Builder for [`ErrorContext`] when the caller already holds every value.
#[derive(Debug, Clone)]
pub struct ErrorContextBuilder {
    inner: ErrorContext,
}

impl Default for ErrorContextBuilder {
    fn default() -> Self {
        Self {
            inner: ErrorContext {
                user_action_description: String::new(),
                request: String::new(),
                content_language_code: String::new(),
                content_country_code: String::new(),
                app_language_tag: String::new(),
                service_name: NO_SERVICE.to_string(),
                package_identifier: String::new(),
                app_version: String::new(),
                os_description: String::new(),
                timestamp: String::new(),
                stack_traces: Vec::new(),
            },
        }
    }
}

impl ErrorContextBuilder {
    pub fn user_action(mut self, value: impl Into<String>) -> Self {
        self.inner.user_action_description = value.into();
        self
    }

    pub fn request(mut self, value: impl Into<String>) -> Self {
        self.inner.request = value.into();
        self
    }

    pub fn content_language(mut self, value: impl Into<String>) -> Self {
        self.inner.content_language_code = value.into();
        self
    }

    pub fn content_country(mut self, value: impl Into<String>) -> Self {
        self.inner.content_country_code = value.into();
        self
    }

    pub fn app_language(mut self, value: impl Into<String>) -> Self {
        self.inner.app_language_tag = value.into();
        self
    }

    pub fn service(mut self, value: impl Into<String>) -> Self {
        self.inner.service_name = value.into();
        self
    }

    pub fn package(mut self, value: impl Into<String>) -> Self {
        self.inner.package_identifier = value.into();
        self
    }

    pub fn version(mut self, value: impl Into<String>) -> Self {
        self.inner.app_version = value.into();
        self
    }

    pub fn os(mut self, value: impl Into<String>) -> Self {
        self.inner.os_description = value.into();
        self
    }

    pub fn timestamp(mut self, value: impl Into<String>) -> Self {
        self.inner.timestamp = value.into();
        self
    }

    /// Append a raw stack trace.
    pub fn trace(mut self, value: impl Into<String>) -> Self {
        self.inner.stack_traces.push(value.into());
        self
    }

    /// Append the trace of `err` and its source chain.
    pub fn error(self, err: &(dyn Error + 'static)) -> Self {
        let trace = error_chain_trace(err);
        self.trace(trace)
    }

    pub fn build(self) -> ErrorContext {
        self.inner
    }
}

/// Render an error and its `source()` chain, outermost first.
pub fn error_chain_trace(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\nCaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
