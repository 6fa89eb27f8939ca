//! Chart configuration
//!
//! Built once by the binary and passed down; nothing below the CLI reads
//! the process environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_VAR: &str = "CU_GANTT_CONFIG";

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "cu_gantt.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GanttConfig {
    /// Viewer window width (points)
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Viewer window height (points)
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Bar thickness in commit-id units
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,

    /// Trailing characters of the log path used as the chart title
    #[serde(default = "default_title_chars")]
    pub title_chars: usize,

    #[serde(default)]
    pub dark_mode: bool,
}

fn default_window_width() -> f32 {
    1400.0
}
fn default_window_height() -> f32 {
    900.0
}
fn default_bar_height() -> f64 {
    1.0
}
fn default_title_chars() -> usize {
    50
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            bar_height: default_bar_height(),
            title_chars: default_title_chars(),
            dark_mode: false,
        }
    }
}

impl GanttConfig {
    /// Load from TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `.env`, then the file named by `CU_GANTT_CONFIG` (or the default path).
    /// A missing file means defaults; a file that fails to parse is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default(&path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Using default chart config ({} not found)", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GanttConfig::default();
        assert_eq!(config.title_chars, 50);
        assert_eq!(config.bar_height, 1.0);
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: GanttConfig = toml::from_str("dark_mode = true\ntitle_chars = 20\n").unwrap();
        assert!(parsed.dark_mode);
        assert_eq!(parsed.title_chars, 20);
        assert_eq!(parsed.window_width, 1400.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = GanttConfig {
            bar_height: 0.8,
            ..GanttConfig::default()
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: GanttConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = GanttConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GanttConfig::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cu_gantt.toml");
        std::fs::write(&path, "title_chars = \"many\"\n").unwrap();
        assert!(GanttConfig::load_or_default(&path).is_err());
    }
}
