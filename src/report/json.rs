//! JSON report encoding.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::fields::fields;
use super::{Renderer, Report};
use crate::types::ReportError;

/// Renders the report as a single JSON object.
///
/// Keys appear in canonical field order, followed by `exceptions` and
/// `user_comment`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String, ReportError> {
        let body = JsonBody(report);
        let json = if self.pretty {
            serde_json::to_string_pretty(&body)?
        } else {
            serde_json::to_string(&body)?
        };
        Ok(json)
    }
}

/// Serializes through a map so key order does not depend on serde_json's
/// map implementation.
struct JsonBody<'r, 'a>(&'r Report<'a>);

impl Serialize for JsonBody<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = self.0;
        let fields = fields(report.context);

        let mut map = serializer.serialize_map(Some(fields.len() + 2))?;
        for field in &fields {
            map.serialize_entry(field.key.json_key(), field.value)?;
        }
        map.serialize_entry("exceptions", report.context.stack_traces())?;
        map.serialize_entry("user_comment", report.comment)?;
        map.end()
    }
}
