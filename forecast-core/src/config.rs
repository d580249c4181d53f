use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    aggregate::DEFAULT_PROGRESS_WINDOW,
    daylight::MissingWindowPolicy,
    time::TimeContext,
};

/// How forecasts are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed UTC offset in seconds; overrides the location's own offset.
    pub utc_offset_seconds: Option<i32>,

    /// Hours that fill the progress bar.
    pub progress_window: usize,

    /// Darkness assumed for hours outside every known sun window.
    pub missing_window: MissingWindowPolicy,

    /// Units requested from the API: "metric", "imperial" or "standard".
    pub units: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: None,
            progress_window: DEFAULT_PROGRESS_WINDOW,
            missing_window: MissingWindowPolicy::default(),
            units: "metric".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [display]
/// utc_offset_seconds = 3600
/// missing_window = "assume_light"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// API key, or an error telling the user how to set one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `forecast configure` first, or pass `--file <payload.json>`."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Pick the display timezone: an explicit override wins, then the configured
    /// offset, then the offset reported with the forecast.
    pub fn time_context(&self, explicit: Option<i32>, payload_offset: i32) -> Result<TimeContext> {
        let seconds = explicit
            .or(self.display.utc_offset_seconds)
            .unwrap_or(payload_offset);

        TimeContext::from_offset_seconds(seconds)
            .with_context(|| format!("Cannot display forecast with UTC offset {seconds}s"))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
