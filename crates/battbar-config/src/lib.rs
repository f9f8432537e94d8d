//! Configuration management for battbar
//!
//! TOML-based configuration covering the few knobs the widget has: segment
//! count, refresh interval, tier coloring policy, and an optional battery
//! path override for the sysfs backend. Everything defaults sensibly so the
//! widget runs with no config file at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use battbar_core::{TierPolicy, DEFAULT_STEPS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BATTBAR_CONFIG";

/// System-wide config location.
pub const SYSTEM_CONFIG: &str = "/etc/battbar/config.toml";

/// Refresh interval matching the widget's original 30-second alarm.
const DEFAULT_REFRESH_SECS: u64 = 30;

fn default_steps() -> u8 {
    DEFAULT_STEPS
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn default_show_label() -> bool {
    true
}

/// Widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Number of bar segments.
    #[serde(default = "default_steps")]
    pub steps: u8,

    /// Seconds between battery samples.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// How segments are colored.
    #[serde(default)]
    pub tier_policy: TierPolicy,

    /// Explicit battery sysfs directory; auto-detected when unset.
    #[serde(default)]
    pub battery_path: Option<PathBuf>,

    /// Whether to draw the percentage text label next to the bar.
    #[serde(default = "default_show_label")]
    pub show_label: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            refresh_secs: default_refresh_secs(),
            tier_policy: TierPolicy::default(),
            battery_path: None,
            show_label: true,
        }
    }
}

impl WidgetConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations: `$BATTBAR_CONFIG`, then
    /// the system config, else defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        let system_config = Path::new(SYSTEM_CONFIG);
        if system_config.exists() {
            return Self::load(system_config);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the widget cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::Invalid("steps must be at least 1".into()));
        }
        if self.refresh_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Refresh interval as a `Duration`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
