//! GitHub-flavored Markdown report encoding.
//!
//! Traces go into `<details>` blocks so an issue stays readable. Trace text
//! is not escaped: a trace that contains a code fence breaks the layout.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::fields::{FieldKey, Labels};
use super::{Renderer, Report};
use crate::types::ReportError;

/// Bullet order of the Markdown field list.
///
/// Service appears twice; existing report consumers expect that line count.
const BULLETS: [FieldKey; 11] = [
    FieldKey::UserAction,
    FieldKey::Request,
    FieldKey::ContentCountry,
    FieldKey::ContentLanguage,
    FieldKey::AppLanguage,
    FieldKey::Service,
    FieldKey::Time,
    FieldKey::Package,
    FieldKey::Service,
    FieldKey::Version,
    FieldKey::Os,
];

/// How many Service bullets the field list carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLine {
    /// Output-compatible layout with the repeated Service bullet.
    #[default]
    Duplicated,
    /// Each field exactly once.
    Once,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub labels: Labels,
    pub service_line: ServiceLine,
}

impl MarkdownOptions {
    pub fn deduplicated() -> Self {
        Self {
            service_line: ServiceLine::Once,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    pub options: MarkdownOptions,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn bullets(&self) -> impl Iterator<Item = FieldKey> + '_ {
        let mut seen_service = false;
        BULLETS.into_iter().filter(move |key| {
            if *key != FieldKey::Service || self.options.service_line == ServiceLine::Duplicated {
                return true;
            }
            !std::mem::replace(&mut seen_service, true)
        })
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String, ReportError> {
        let context = report.context;
        let traces = context.stack_traces();
        let multiple = traces.len() > 1;

        let mut out = String::new();
        if !report.comment.is_empty() {
            writeln!(out, "{}", report.comment)?;
        }

        out.push_str("## Exception");
        for key in self.bullets() {
            write!(
                out,
                "\n* __{}:__ {}",
                self.options.labels.get(key),
                key.value(context)
            )?;
        }
        out.push('\n');

        if multiple {
            writeln!(
                out,
                "<details><summary><b>Exceptions ({})</b></summary><p>",
                traces.len()
            )?;
        }

        for (i, trace) in traces.iter().enumerate() {
            out.push_str("<details><summary><b>Crash log ");
            if multiple {
                write!(out, "{}", i + 1)?;
            }
            out.push_str("</b></summary><p>\n");
            write!(out, "\n```\n{}\n```\n", trace)?;
            out.push_str("</details>\n");
        }

        if multiple {
            out.push_str("</p></details>\n");
        }
        out.push_str("<hr>\n");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorContext;

    fn sample(traces: &[&str]) -> ErrorContext {
        let mut builder = ErrorContext::builder()
            .user_action("search")
            .request("https://example.com")
            .content_language("en")
            .content_country("US")
            .app_language("en-US")
            .service("YouTube")
            .package("org.example.app")
            .version("1.2.3")
            .os("Linux Android 13 - 33")
            .timestamp("2024-01-01T00:00:00+00:00");
        for t in traces {
            builder = builder.trace(*t);
        }
        builder.build()
    }

    fn render(ctx: &ErrorContext, comment: &str) -> String {
        MarkdownRenderer::default()
            .render(&Report::new(ctx, comment))
            .unwrap()
    }

    #[test]
    fn test_single_trace_layout() {
        let md = render(&sample(&["trace1"]), "");
        let expected = "## Exception\n\
* __User Action:__ search\n\
* __Request:__ https://example.com\n\
* __Content Country:__ US\n\
* __Content Language:__ en\n\
* __App Language:__ en-US\n\
* __Service:__ YouTube\n\
* __Timestamp:__ 2024-01-01T00:00:00+00:00\n\
* __Package:__ org.example.app\n\
* __Service:__ YouTube\n\
* __Version:__ 1.2.3\n\
* __OS:__ Linux Android 13 - 33\n\
<details><summary><b>Crash log </b></summary><p>\n\
\n\
```\n\
trace1\n\
```\n\
</details>\n\
<hr>\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_multiple_traces_wrapped() {
        let md = render(&sample(&["a", "b", "c"]), "");

        assert_eq!(md.matches("Exceptions (3)").count(), 1);
        assert_eq!(md.matches("<details><summary><b>Crash log").count(), 3);
        assert!(md.contains("<b>Crash log 1</b>"));
        assert!(md.contains("<b>Crash log 3</b>"));
        assert!(md.contains("</p></details>\n<hr>\n"));

        let first = md.find("Crash log 1").unwrap();
        let second = md.find("Crash log 2").unwrap();
        assert!(first < second);
        assert!(md.find("\na\n").unwrap() < md.find("\nb\n").unwrap());
    }

    #[test]
    fn test_single_trace_has_no_wrapper() {
        let md = render(&sample(&["only"]), "");
        assert!(!md.contains("Exceptions ("));
        assert!(!md.contains("</p></details>"));
    }

    #[test]
    fn test_comment_is_first_line() {
        let md = render(&sample(&["t"]), "it crashed when I scrolled");
        assert!(md.starts_with("it crashed when I scrolled\n## Exception\n"));
    }

    #[test]
    fn test_empty_comment_has_no_leading_line() {
        let md = render(&sample(&["t"]), "");
        assert!(md.starts_with("## Exception"));
    }

    #[test]
    fn test_heading_appears_once() {
        let md = render(&sample(&["a", "b"]), "see below");
        assert_eq!(md.matches("## Exception").count(), 1);
    }

    #[test]
    fn test_no_traces() {
        let md = render(&sample(&[]), "");
        assert!(!md.contains("Crash log"));
        assert!(md.ends_with("* __OS:__ Linux Android 13 - 33\n<hr>\n"));
    }

    #[test]
    fn test_service_duplicated_by_default() {
        let md = render(&sample(&["t"]), "");
        assert_eq!(md.matches("* __Service:__ YouTube").count(), 2);
    }

    #[test]
    fn test_service_once_when_deduplicated() {
        let renderer = MarkdownRenderer::new(MarkdownOptions::deduplicated());
        let ctx = sample(&["t"]);
        let md = renderer.render(&Report::new(&ctx, "")).unwrap();

        assert_eq!(md.matches("* __Service:__ YouTube").count(), 1);
        assert_eq!(md.matches("\n* __").count(), 10);
        // first occurrence keeps its position, before Timestamp
        assert!(md.find("__Service:__").unwrap() < md.find("__Timestamp:__").unwrap());
    }

    #[test]
    fn test_custom_labels() {
        let mut options = MarkdownOptions::default();
        options.labels.os = "Betriebssystem".to_string();
        let ctx = sample(&["t"]);
        let md = MarkdownRenderer::new(options)
            .render(&Report::new(&ctx, ""))
            .unwrap();

        assert!(md.contains("* __Betriebssystem:__ Linux Android 13 - 33"));
        assert!(!md.contains("__OS:__"));
    }

    #[test]
    fn test_trace_content_not_escaped() {
        let md = render(&sample(&["<b>*not* markdown</b>"]), "");
        assert!(md.contains("\n```\n<b>*not* markdown</b>\n```\n"));
    }
}
