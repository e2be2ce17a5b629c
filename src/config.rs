use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wardrobe::category;

/// Main wardrobe configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub log_level: LogLevel,
    pub outfit: OutfitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the users, session, items and last combo documents
    pub data: PathBuf,
}

/// Category rules for outfit generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutfitConfig {
    /// Every one of these must be present for an outfit to be generated
    pub required: Vec<String>,
    /// Included when present in the wardrobe
    pub optional: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            _ => eyre::bail!("Unknown log level: {}. Supported: trace, debug, info, warn, error, off", s),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: Config::wardrobe_dir().join("data"),
        }
    }
}

impl Default for OutfitConfig {
    fn default() -> Self {
        Self {
            required: vec![
                category::SHIRT.to_string(),
                category::PANT.to_string(),
                category::SHOES.to_string(),
            ],
            optional: vec![category::JACKET.to_string(), category::ACCESSORY.to_string()],
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("WARDROBE_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from WARDROBE_CONFIG: {}", e);
                    }
                }
            }
        }

        if let Ok(wardrobe_dir) = std::env::var("WARDROBE_DIR") {
            let path = PathBuf::from(wardrobe_dir).join("wardrobe.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from WARDROBE_DIR: {}", e);
                    }
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("wardrobe").join("wardrobe.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./wardrobe.yaml (for development)
        let local_config = PathBuf::from("wardrobe.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject configs that could never produce an outfit
    pub fn validate(&self) -> Result<()> {
        if self.outfit.required.is_empty() {
            eyre::bail!("outfit.required must name at least one category");
        }
        if let Some(blank) = self
            .outfit
            .required
            .iter()
            .chain(&self.outfit.optional)
            .find(|c| c.trim().is_empty())
        {
            eyre::bail!("Outfit categories must not be blank (got {:?})", blank);
        }
        if let Some(dup) = self.outfit.optional.iter().find(|c| self.outfit.required.contains(*c)) {
            eyre::bail!("Category {} is listed as both required and optional", dup);
        }
        Ok(())
    }

    /// Get the wardrobe directory (config file and default data directory)
    pub fn wardrobe_dir() -> PathBuf {
        std::env::var("WARDROBE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("wardrobe"))
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.data)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.outfit.required, vec!["Shirt", "Pant", "Shoes"]);
        assert_eq!(config.outfit.optional, vec!["Jacket", "Accessory"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/bin");
        let expanded = Config::expand_path(&path);
        assert_eq!(expanded, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test");
        let expanded = Config::expand_path(&path);
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.to_string_lossy().contains("test"));
    }

    #[test]
    fn test_wardrobe_dir_not_empty() {
        // Don't modify env vars to avoid test interference
        let dir = Config::wardrobe_dir();
        assert!(!dir.to_string_lossy().is_empty());
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wardrobe.yaml");
        fs::write(&path, "log_level: debug\npaths:\n  data: /tmp/wardrobe-data\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.paths.data, PathBuf::from("/tmp/wardrobe-data"));
        assert_eq!(config.outfit, OutfitConfig::default());
    }

    #[test]
    fn test_load_rejects_overlapping_categories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wardrobe.yaml");
        fs::write(
            &path,
            "outfit:\n  required: [Shirt, Pant]\n  optional: [Pant]\n",
        )
        .unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_empty_required() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wardrobe.yaml");
        fs::write(&path, "outfit:\n  required: []\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = serde_yaml::from_str(&yaml_str).expect("Failed to deserialize");
        assert_eq!(parsed.outfit, config.outfit);
        assert_eq!(parsed.log_level, config.log_level);
    }
}
