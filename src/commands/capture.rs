//! Capture command - record an error context for later rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use crash_report::{ErrorContext, NO_SERVICE, SystemContextProvider};

#[derive(Args)]
pub struct CaptureCmd {
    /// What the user was doing (e.g. "searching")
    #[arg(short, long)]
    pub action: String,

    /// Operation, URL or identifier being processed
    #[arg(short, long, default_value = "")]
    pub request: String,

    /// Service involved in the failure
    #[arg(short, long, default_value = NO_SERVICE)]
    pub service: String,

    /// File holding one stack trace (repeatable, kept in order)
    #[arg(long = "trace-file")]
    pub trace_files: Vec<PathBuf>,

    /// Stack trace text (repeatable, added after --trace-file entries)
    #[arg(long = "trace")]
    pub traces: Vec<String>,

    /// Package identifier of the failing application
    #[arg(long, env = "CRASHREP_PACKAGE")]
    pub package: Option<String>,

    /// Version of the failing application
    #[arg(long, env = "CRASHREP_APP_VERSION")]
    pub app_version: Option<String>,

    /// Write the context to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CaptureCmd {
    pub async fn run(&self) -> Result<()> {
        let traces = self.collect_traces().await?;
        if traces.is_empty() {
            warn!("no stack traces given, capturing context without exceptions");
        }

        let mut provider = SystemContextProvider::new();
        if let Some(package) = &self.package {
            provider = provider.with_package(package);
        }
        if let Some(version) = &self.app_version {
            provider = provider.with_version(version);
        }

        let context = ErrorContext::capture(
            &provider,
            &self.action,
            &self.request,
            &self.service,
            traces,
        );

        let json =
            serde_json::to_string_pretty(&context).context("Failed to serialize context")?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, json)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Context written to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    async fn collect_traces(&self) -> Result<Vec<String>> {
        let mut traces = Vec::with_capacity(self.trace_files.len() + self.traces.len());
        for path in &self.trace_files {
            let trace = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read trace file {}", path.display()))?;
            traces.push(trace.trim_end().to_string());
        }
        traces.extend(self.traces.iter().cloned());
        Ok(traces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_collect_traces_keeps_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "first trace\n\tat a\n").unwrap();
        std::fs::write(&second, "second trace").unwrap();

        let cmd = CaptureCmd {
            action: "search".to_string(),
            request: String::new(),
            service: NO_SERVICE.to_string(),
            trace_files: vec![first, second],
            traces: vec!["inline".to_string()],
            package: None,
            app_version: None,
            output: None,
        };

        let traces = cmd.collect_traces().await.unwrap();
        assert_eq!(traces, ["first trace\n\tat a", "second trace", "inline"]);
    }

    #[tokio::test]
    async fn test_missing_trace_file_is_error() {
        let cmd = CaptureCmd {
            action: "search".to_string(),
            request: String::new(),
            service: NO_SERVICE.to_string(),
            trace_files: vec![PathBuf::from("/nonexistent/trace.txt")],
            traces: vec![],
            package: None,
            app_version: None,
            output: None,
        };
        assert!(cmd.collect_traces().await.is_err());
    }

    #[tokio::test]
    async fn test_run_writes_context_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("ctx.json");

        let cmd = CaptureCmd {
            action: "opening channel".to_string(),
            request: "channel/1".to_string(),
            service: "YouTube".to_string(),
            trace_files: vec![],
            traces: vec!["boom".to_string()],
            package: Some("org.example.app".to_string()),
            app_version: Some("1.2.3".to_string()),
            output: Some(output.clone()),
        };
        cmd.run().await.unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let ctx: ErrorContext = serde_json::from_str(&content).unwrap();
        assert_eq!(ctx.user_action_description(), "opening channel");
        assert_eq!(ctx.package_identifier(), "org.example.app");
        assert_eq!(ctx.app_version(), "1.2.3");
        assert_eq!(ctx.stack_traces(), ["boom".to_string()]);
        assert!(!ctx.timestamp().is_empty());
    }
}
