//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name under the platform config directory.
pub const APP_NAME: &str = "polecap";

/// File name of the persisted configuration.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Cap boundary settings.
    pub cap: CapConfig,
    /// Zoom and level-offset settings.
    pub zoom: ZoomConfig,
    /// Worker pool settings.
    pub pipeline: PipelineConfig,
    /// Style manifest location.
    pub style: StyleConfig,
    /// Report output settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Cap boundary configuration.
///
/// Unset values fall back to the map projection's own maximum latitude.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CapConfig {
    /// Latitude magnitude of the cap boundary in degrees.
    pub threshold_deg: Option<f64>,
    /// Representable latitude limit of the map projection in degrees.
    pub max_latitude_deg: Option<f64>,
}

/// Zoom configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom level to generate polar tiles for.
    pub level: u32,
    pub min_zoom_level: u32,
    pub max_zoom_level: u32,
    pub storage_level_offset: i32,
    pub geometry_level_offset: i32,
}

/// Worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of synthesis threads.
    pub worker_count: usize,
    /// Maximum number of tiles in flight.
    pub budget: usize,
}

/// Style configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// RON style manifest. The built-in polar style is used when unset.
    pub path: Option<PathBuf>,
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON report destination. No report is written when unset.
    pub path: Option<PathBuf>,
    /// Pretty-print the JSON report.
    pub pretty: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            level: 4,
            min_zoom_level: 1,
            max_zoom_level: 20,
            storage_level_offset: -1,
            geometry_level_offset: -1,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            budget: 64,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform default config directory, e.g. `~/.config/polecap` on Linux.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if the OS exposes no config directory.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("level: 4"));
        assert!(ron_str.contains("worker_count: 4"));
        assert!(ron_str.contains("storage_level_offset: -1"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let ron_str = "(zoom: (level: 7))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.zoom.level, 7);
        assert_eq!(config.zoom.min_zoom_level, 1);
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.cap, CapConfig::default());
    }

    #[test]
    fn test_cap_overrides_parse() {
        let ron_str = "(cap: (threshold_deg: Some(84.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.cap.threshold_deg, Some(84.0));
        assert_eq!(config.cap.max_latitude_deg, None);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.zoom.level = 9;
        config.cap.threshold_deg = Some(84.5);
        config.style.path = Some(PathBuf::from("styles/polar.ron"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.pipeline.worker_count = 8;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().pipeline.worker_count, 8);
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// polecap\n(\n  // defaults\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
