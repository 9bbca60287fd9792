//! Report configuration.
//!
//! Config is stored at `~/.config/crashrep/config.toml` and contains:
//! - default output format
//! - Markdown layout choices and field labels

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::{Labels, MarkdownOptions, ReportFormat, ServiceLine};

const CONFIG_DIR: &str = "crashrep";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Format used when neither a format nor a channel is given.
    #[serde(default)]
    pub default_format: ReportFormat,

    /// Emit the Service bullet once instead of the compatible duplicated layout.
    #[serde(default)]
    pub dedupe_service: bool,

    /// Indent JSON output.
    #[serde(default)]
    pub pretty_json: bool,

    /// Field labels for Markdown and plain text.
    #[serde(default)]
    pub labels: Labels,
}

impl ReportConfig {
    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")
    }

    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            labels: self.labels.clone(),
            service_line: if self.dedupe_service {
                ServiceLine::Once
            } else {
                ServiceLine::Duplicated
            },
        }
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
