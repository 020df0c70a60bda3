//! TOML-based application configuration.
//!
//! Stored at `~/.config/tomata/config.toml`. A missing file yields the
//! defaults; every field also defaults individually so partial files stay
//! valid across upgrades.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::glyph::Style;

use super::data_dir;

/// Timing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work segment length in minutes. Breaks derive from this.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: f64,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_style")]
    pub style: Style,
}

/// Notification and sound preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

fn default_work_minutes() -> f64 {
    25.0
}

fn default_style() -> Style {
    Style::Electronic
}

fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            notifications: true,
            sound: true,
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = data_dir().map_err(|err| ConfigError::LoadFailed {
        path: PathBuf::from("~/.config/tomata"),
        message: err.to_string(),
    })?;
    Ok(dir.join("config.toml"))
}

impl Config {
    /// Load the configuration, writing a default file on first run so the
    /// user has something to edit.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            let config = Self::default();
            if let Err(err) = config.save() {
                tracing::warn!(error = %err, "could not write default configuration");
            }
            return Ok(config);
        }
        Self::load()
    }

    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|err| ConfigError::LoadFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::LoadFailed {
            path,
            message: err.to_string(),
        })
    }

    /// Write the configuration back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        let raw = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.timer.work_minutes, 25.0);
        assert_eq!(config.ui.style, Style::Electronic);
        assert!(config.alerts.notifications);
        assert!(config.alerts.sound);
    }

    #[test]
    fn partial_document_fills_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            [timer]
            work_minutes = 50.0

            [ui]
            style = "shadow"
            "#,
        )
        .unwrap();
        assert_eq!(config.timer.work_minutes, 50.0);
        assert_eq!(config.ui.style, Style::Shadow);
        assert!(config.alerts.sound);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.timer.work_minutes = 0.5;
        config.ui.style = Style::Colossal;
        config.alerts.sound = false;
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.timer.work_minutes, 0.5);
        assert_eq!(back.ui.style, Style::Colossal);
        assert!(!back.alerts.sound);
    }
}
