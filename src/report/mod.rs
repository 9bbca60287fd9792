//! Report building.
//!
//! Every format renders the same ordered field list (see [`fields`]) plus
//! the stack traces and the user comment:
//! - [`JsonRenderer`] - single JSON object, for email bodies and intake forms
//! - [`MarkdownRenderer`] - GitHub-flavored Markdown with collapsible traces
//! - [`PlainRenderer`] - plain text for simple display surfaces
//!
//! The `build_*` functions never fail: a rendering error is logged and an
//! empty string is returned, so reporting a crash cannot cause another one.

mod fields;
mod json;
mod markdown;
mod plain;

pub use fields::{FieldKey, Labels, ReportField, fields};
pub use json::JsonRenderer;
pub use markdown::{MarkdownOptions, MarkdownRenderer, ServiceLine};
pub use plain::{PlainRenderer, TRACE_SEPARATOR, format_stack_trace_block};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::types::{ErrorContext, ReportError};

/// Borrowed inputs of one report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub context: &'a ErrorContext,
    pub comment: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(context: &'a ErrorContext, comment: &'a str) -> Self {
        Self { context, comment }
    }
}

/// Turns a report into text in one format.
pub trait Renderer {
    fn render(&self, report: &Report<'_>) -> Result<String, ReportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
    Plain,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Plain => "plain",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "plain" | "text" => Ok(ReportFormat::Plain),
            _ => Err(format!("unknown report format: {}", s)),
        }
    }
}

/// Where a finished report is sent. Transport itself happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Clipboard,
    Email,
    IssueTracker,
    Share,
}

impl Channel {
    pub fn preferred_format(&self) -> ReportFormat {
        match self {
            Channel::Email => ReportFormat::Json,
            Channel::Clipboard | Channel::IssueTracker | Channel::Share => ReportFormat::Markdown,
        }
    }
}

pub fn try_build_json_report(context: &ErrorContext, comment: &str) -> Result<String, ReportError> {
    JsonRenderer::default().render(&Report::new(context, comment))
}

pub fn try_build_markdown_report(
    context: &ErrorContext,
    comment: &str,
    options: &MarkdownOptions,
) -> Result<String, ReportError> {
    MarkdownRenderer::new(options.clone()).render(&Report::new(context, comment))
}

/// Build the JSON report, or `""` if encoding fails.
pub fn build_json_report(context: &ErrorContext, comment: &str) -> String {
    render_or_empty(&JsonRenderer::default(), ReportFormat::Json, context, comment)
}

/// Build the Markdown report in the output-compatible layout, or `""` on failure.
pub fn build_markdown_report(context: &ErrorContext, comment: &str) -> String {
    build_markdown_report_with(context, comment, &MarkdownOptions::default())
}

pub fn build_markdown_report_with(
    context: &ErrorContext,
    comment: &str,
    options: &MarkdownOptions,
) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    render_or_empty(&renderer, ReportFormat::Markdown, context, comment)
}

pub fn build_plain_report(context: &ErrorContext, comment: &str) -> String {
    render_or_empty(&PlainRenderer::default(), ReportFormat::Plain, context, comment)
}

/// Render with `renderer`, swallowing and logging any failure.
pub fn render_or_empty<R: Renderer + ?Sized>(
    renderer: &R,
    format: ReportFormat,
    context: &ErrorContext,
    comment: &str,
) -> String {
    if context.stack_traces().is_empty() {
        warn!(format = %format, "building report without stack traces");
    }

    match renderer.render(&Report::new(context, comment)) {
        Ok(text) => text,
        Err(err) => {
            error!(format = %format, error = %err, "could not build report");
            String::new()
        }
    }
}
