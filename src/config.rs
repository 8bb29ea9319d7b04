use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{SortConfig, SortDirection, SortField};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

/// Where deals come from; the built-in sample pipeline when unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    pub deals_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_sort_field")]
    pub default_sort_field: SortField,
    #[serde(default = "default_sort_direction")]
    pub default_sort_direction: SortDirection,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_sort_field: default_sort_field(),
            default_sort_direction: default_sort_direction(),
        }
    }
}

impl QuerySettings {
    pub fn default_sort(&self) -> SortConfig {
        SortConfig::new(self.default_sort_field, self.default_sort_direction)
    }
}

fn default_sort_field() -> SortField { SortField::MatchScore }
fn default_sort_direction() -> SortDirection { SortDirection::Desc }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Delay spent in each upload step, for progress display only
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self { step_delay_ms: default_step_delay_ms() }
    }
}

impl UploadSettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

fn default_step_delay_ms() -> u64 { 1500 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub theme: Theme,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DEALFLOW__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DEALFLOW__UPLOAD__STEP_DELAY_MS -> upload.step_delay_ms
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("DEALFLOW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
