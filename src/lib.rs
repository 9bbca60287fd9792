//! Crash report building - turn a captured error context into JSON or
//! Markdown report text.

pub mod config;
pub mod provider;
pub mod report;
pub mod types;

pub use provider::{ContextProvider, StaticContextProvider, SystemContextProvider};
pub use report::{
    Channel, MarkdownOptions, ReportFormat, ServiceLine, build_json_report,
    build_markdown_report, build_markdown_report_with, build_plain_report,
    format_stack_trace_block,
};
pub use types::{ErrorContext, ErrorContextBuilder, NO_SERVICE, ReportError};
