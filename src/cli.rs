//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{CaptureCmd, ConfigCmd, RenderCmd};

#[derive(Parser)]
#[command(name = "crashrep")]
#[command(about = "Build JSON and Markdown crash reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Capture an error context from traces and the current environment
    Capture(CaptureCmd),

    /// Render a captured error context as a report
    Render(RenderCmd),

    /// Manage configuration (default format, labels, etc.)
    Config(ConfigCmd),
}

impl Command {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self {
            Command::Capture(cmd) => cmd.run().await,
            Command::Render(cmd) => cmd.run().await,
            Command::Config(cmd) => cmd.run().await,
        }
    }
}
