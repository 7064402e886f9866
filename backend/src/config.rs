//! Application configuration.
//!
//! Settings are read from an optional `schedule-chart.toml` file and then
//! overridden by environment variables. Every field has a default, so an empty
//! or missing file yields a working configuration.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [storage]
//! output_dir = "generated_charts"
//! static_dir = "static"
//!
//! [chart]
//! measure_text = true
//!
//! [chart.grid]
//! hour_start = 6
//! hour_end = 23
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::layout::GridConfig;
use crate::services::render::DEFAULT_TITLE;
use crate::services::text_fit::CharWidthMeasurer;

pub const CONFIG_FILE_NAME: &str = "schedule-chart.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid chart settings: {0}")]
    Chart(#[from] crate::error::ChartError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub chart: ChartSettings,
}

/// Bind address settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Where charts are written and static assets are served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated_charts"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Chart rendering settings passed explicitly into every render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Fit labels by measuring text. When false every label uses
    /// `grid.fallback_font_size`.
    pub measure_text: bool,
    pub title: String,
    pub measurer: CharWidthMeasurer,
    pub grid: GridConfig,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            measure_text: true,
            title: DEFAULT_TITLE.to_string(),
            measurer: CharWidthMeasurer::default(),
            grid: GridConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.chart.grid.validate()?;
        Ok(config)
    }

    /// Load configuration from the first `schedule-chart.toml` found in the
    /// current directory, `backend/`, or the parent directory, falling back to
    /// defaults when none exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Apply environment variable overrides.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host
    /// - `PORT`: Server port
    /// - `CHART_OUTPUT_DIR`: Directory for generated charts
    /// - `CHART_STATIC_DIR`: Directory of static assets
    /// - `CHART_MEASURE_TEXT`: `true`/`false`, enables label measurement
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(dir) = env::var("CHART_OUTPUT_DIR") {
            self.storage.output_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("CHART_STATIC_DIR") {
            self.storage.static_dir = PathBuf::from(dir);
        }
        if let Ok(flag) = env::var("CHART_MEASURE_TEXT") {
            self.chart.measure_text = parse_bool(&flag).ok_or_else(|| ConfigError::InvalidEnv {
                key: "CHART_MEASURE_TEXT".to_string(),
                value: flag.clone(),
            })?;
        }
        Ok(self)
    }

    /// File configuration (or defaults) with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_default_location()?.apply_env()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.output_dir, PathBuf::from("generated_charts"));
        assert!(config.chart.measure_text);
        assert_eq!(config.chart.grid.hour_count(), 17);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [chart]
            measure_text = false

            [chart.grid]
            hour_start = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.chart.measure_text);
        assert_eq!(config.chart.grid.hour_start, 7);
        assert_eq!(config.chart.grid.hour_end, 23);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let err = AppConfig::from_toml_str("[chart.grid]\nhour_start = 20\nhour_end = 8\n");
        assert!(matches!(err, Err(ConfigError::Chart(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/schedule-chart.toml"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
