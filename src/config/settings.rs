//! Configuration settings for taskpulse.
//!
//! Settings are loaded from `~/.taskpulse/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsTimePeriod;
use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::TaskpulseError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Analytics defaults.
    pub analytics: AnalyticsConfig,
    /// Where tasks are read from.
    pub source: SourceConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Analytics defaults used when the command line leaves them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Period name, e.g. `last30days` or `this-week`.
    #[serde(default = "default_period")]
    pub default_period: String,
    /// Window length for the trend command.
    #[serde(default = "default_trend_interval")]
    pub trend_interval_days: i64,
    /// Categories shown by the pretty renderer.
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

/// Kind of task store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    #[default]
    Sqlite,
}

/// Task source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Overrides the default file under the data root.
    pub path: Option<PathBuf>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_period() -> String {
    "last30days".to_string()
}

const fn default_trend_interval() -> i64 {
    1
}

const fn default_top_categories() -> usize {
    10
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            trend_interval_days: default_trend_interval(),
            top_categories: default_top_categories(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse the configured default period.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::Config` if the name is not a known period.
    pub fn period(&self) -> Result<AnalyticsTimePeriod, TaskpulseError> {
        self.default_period.parse()
    }
}

impl SourceConfig {
    /// The store file to open, given the data root.
    #[must_use]
    pub fn resolve_path(&self, paths: &Paths) -> PathBuf {
        self.path.clone().unwrap_or_else(|| match self.kind {
            SourceKind::Json => paths.tasks_file.clone(),
            SourceKind::Sqlite => paths.database.clone(),
        })
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, TaskpulseError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TaskpulseError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            TaskpulseError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}
