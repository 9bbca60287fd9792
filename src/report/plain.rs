//! Plain-text rendering for display surfaces without Markdown support.

use std::fmt::Write;

use super::fields::{Labels, fields};
use super::{Renderer, Report};
use crate::types::ReportError;

pub const TRACE_SEPARATOR: &str = "-------------------------------------";

/// Join traces with a separator line before each entry and after the last.
///
/// Entries without a trailing newline get one, so the separator always
/// starts its own line.
pub fn format_stack_trace_block<S: AsRef<str>>(traces: &[S]) -> String {
    let mut out = String::new();
    for trace in traces {
        let trace = trace.as_ref();
        out.push_str(TRACE_SEPARATOR);
        out.push('\n');
        out.push_str(trace);
        if !trace.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(TRACE_SEPARATOR);
    out
}

#[derive(Debug, Clone, Default)]
pub struct PlainRenderer {
    pub labels: Labels,
}

impl Renderer for PlainRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String, ReportError> {
        let mut out = String::new();
        for field in fields(report.context) {
            writeln!(out, "{}: {}", self.labels.get(field.key), field.value)?;
        }
        if !report.comment.is_empty() {
            writeln!(out, "Comment:\n{}", report.comment)?;
        }
        out.push('\n');
        out.push_str(&format_stack_trace_block(report.context.stack_traces()));
        out.push('\n');
        Ok(out)
    }
}
