//! Configuration management for taskpulse.
//!
//! This module handles loading configuration from `~/.taskpulse/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{AnalyticsConfig, ColorSetting, Config, GeneralConfig, SourceConfig, SourceKind};
