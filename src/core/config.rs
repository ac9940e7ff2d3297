//! Configuration module for the photo sorting tool
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\photo_sorting_tool\config.toml
//! - Linux/macOS: ~/.config/photo_sorting_tool/config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name used for config directory
const APP_NAME: &str = "photo_sorting_tool";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors from configuration handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    ConfigDirNotFound,

    #[error("Failed to read config file '{0}': {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file '{0}': {1}")]
    ParseError(PathBuf, String),

    #[error("Failed to write config file '{0}': {1}")]
    WriteError(PathBuf, String),
}

/// Get the standard configuration directory for the application.
///
/// Returns:
/// - Windows: %APPDATA%\photo_sorting_tool
/// - Linux/macOS: ~/.config/photo_sorting_tool
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Creates the config directory and writes the default config template.
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        let default_config = Config::generate_default_config();
        fs::write(&config_path, default_config)
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Workbook settings
    pub sheet: SheetConfig,

    /// Copy execution settings
    pub copying: CopyingConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Sub-directory created inside the source directory when no explicit
    /// output path is given
    pub subdir_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            subdir_name: "Сортировка".to_string(),
        }
    }
}

/// Workbook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Name of the worksheet carrying the settings rows
    pub settings_sheet: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            settings_sheet: "настройки".to_string(),
        }
    }
}

/// Copy execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyingConfig {
    /// How many file copies run concurrently within one wave
    pub concurrency: usize,
}

impl Default for CopyingConfig {
    fn default() -> Self {
        Self {
            concurrency: crate::engine::DEFAULT_CONCURRENCY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Whether to also log to a file
    pub log_to_file: bool,

    /// Path of the log file
    pub log_file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: PathBuf::from("photo_sorter.log"),
        }
    }
}

impl Config {
    /// Load configuration from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from the standard location, falling back to the
    /// defaults when no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save the configuration to a specific file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e.to_string()))?;
        Ok(())
    }

    /// Generate the default configuration file content with comments.
    pub fn generate_default_config() -> String {
        r#"# Photo Sorting Tool configuration

[output]
# Sub-directory created inside the source directory when no explicit
# output path is passed on the command line
subdir_name = "Сортировка"

[sheet]
# Name of the worksheet carrying the settings rows
settings_sheet = "настройки"

[copying]
# How many file copies run concurrently within one wave
concurrency = 5

[logging]
# Log level: error, warn, info, debug, trace
level = "info"
# Whether to also log to a file
log_to_file = false
# Path of the log file
log_file = "photo_sorter.log"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.output.subdir_name, "Сортировка");
        assert_eq!(config.sheet.settings_sheet, "настройки");
        assert_eq!(config.copying.concurrency, 5);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.log_to_file);
    }

    #[test]
    fn test_generated_template_parses_to_defaults() {
        let template = Config::generate_default_config();
        let parsed: Config = toml::from_str(&template).unwrap();
        assert_eq!(parsed.output.subdir_name, Config::default().output.subdir_name);
        assert_eq!(parsed.copying.concurrency, Config::default().copying.concurrency);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.copying.concurrency = 8;
        config.sheet.settings_sheet = "options".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.copying.concurrency, 8);
        assert_eq!(loaded.sheet.settings_sheet, "options");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[copying]\nconcurrency = 3\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.copying.concurrency, 3);
        assert_eq!(loaded.output.subdir_name, "Сортировка");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("nope.toml")).is_err());
    }
}
