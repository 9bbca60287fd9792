//! Render command - turn a captured error context into a report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crash_report::config::ReportConfig;
use crash_report::report::{
    self, Channel, JsonRenderer, MarkdownRenderer, PlainRenderer, ReportFormat,
};
use crash_report::ErrorContext;

#[derive(Args)]
pub struct RenderCmd {
    /// Context file written by `crashrep capture` (.json or .toml)
    pub context: PathBuf,

    /// Free-text comment placed in the report
    #[arg(short, long, default_value = "")]
    pub comment: String,

    /// Output format (overrides --channel and the configured default)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Pick the format the given channel expects
    #[arg(long, value_enum)]
    pub channel: Option<Channel>,

    /// List the Service field once in Markdown output
    #[arg(long)]
    pub dedupe_service: bool,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderCmd {
    pub async fn run(&self) -> Result<()> {
        let config = ReportConfig::load()?;
        let context = load_context(&self.context).await?;

        let text = self.render(&context, &config);
        if text.is_empty() {
            anyhow::bail!("Failed to build report (run with RUST_LOG=error for details)");
        }

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Report written to {}", path.display());
            }
            None => print!("{}", text),
        }

        Ok(())
    }

    /// Resolve the output format: explicit flag, then channel, then config.
    fn format(&self, config: &ReportConfig) -> ReportFormat {
        self.format
            .or_else(|| self.channel.map(|c| c.preferred_format()))
            .unwrap_or(config.default_format)
    }

    fn render(&self, context: &ErrorContext, config: &ReportConfig) -> String {
        let format = self.format(config);
        debug!(format = %format, traces = context.stack_traces().len(), "rendering report");

        match format {
            ReportFormat::Json => {
                let renderer = JsonRenderer {
                    pretty: self.pretty || config.pretty_json,
                };
                report::render_or_empty(&renderer, format, context, &self.comment)
            }
            ReportFormat::Markdown => {
                let mut options = config.markdown_options();
                if self.dedupe_service {
                    options.service_line = report::ServiceLine::Once;
                }
                let renderer = MarkdownRenderer::new(options);
                report::render_or_empty(&renderer, format, context, &self.comment)
            }
            ReportFormat::Plain => {
                let renderer = PlainRenderer {
                    labels: config.labels.clone(),
                };
                report::render_or_empty(&renderer, format, context, &self.comment)
            }
        }
    }
}

/// Read an error context, choosing the decoder by file extension.
pub async fn load_context(path: &Path) -> Result<ErrorContext> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).context("Failed to parse context file as TOML")
    } else {
        serde_json::from_str(&content).context("Failed to parse context file as JSON")
    }
}
