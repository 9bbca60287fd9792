//! Config command - manage local configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use crash_report::config::ReportConfig;
use crash_report::report::{FieldKey, ReportFormat};

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub command: ConfigSubCmd,
}

#[derive(Subcommand)]
pub enum ConfigSubCmd {
    /// Set the default report format (default: markdown)
    SetFormat(SetFormatCmd),

    /// List the Service field once in Markdown reports
    SetDedupe(SetDedupeCmd),

    /// Set the label shown for a field (e.g. `os "Operating System"`)
    SetLabel(SetLabelCmd),

    /// Show current configuration
    Show,
}

#[derive(Args)]
pub struct SetFormatCmd {
    #[arg(value_enum)]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SetDedupeCmd {
    #[arg(action = clap::ArgAction::Set)]
    pub enabled: bool,
}

#[derive(Args)]
pub struct SetLabelCmd {
    /// Field key as used in JSON reports (user_action, request, os, time, ...)
    pub field: FieldKey,

    /// Label text
    pub label: String,
}

impl ConfigCmd {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            ConfigSubCmd::SetFormat(cmd) => {
                let mut config = ReportConfig::load()?;
                config.default_format = cmd.format;
                config.save()?;
                println!("Default format set to: {}", cmd.format);
            }
            ConfigSubCmd::SetDedupe(cmd) => {
                let mut config = ReportConfig::load()?;
                config.dedupe_service = cmd.enabled;
                config.save()?;
                println!("Service deduplication: {}", cmd.enabled);
            }
            ConfigSubCmd::SetLabel(cmd) => {
                let mut config = ReportConfig::load()?;
                config.labels.set(cmd.field, cmd.label.clone());
                config.save()?;
                println!("Label for {} set to: {}", cmd.field.json_key(), cmd.label);
            }
            ConfigSubCmd::Show => {
                let config = ReportConfig::load()?;
                println!("Config: {}", ReportConfig::config_path()?.display());
                println!();
                println!("default_format:  {}", config.default_format);
                println!("dedupe_service:  {}", config.dedupe_service);
                println!("pretty_json:     {}", config.pretty_json);
                println!();
                println!("labels:");
                for key in FieldKey::ALL {
                    println!("  {:<18}{}", key.json_key(), config.labels.get(key));
                }
            }
        }
        Ok(())
    }
}
