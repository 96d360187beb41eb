use crate::models::Category;
use crate::persistence::DEFAULT_SLOT_KEY;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from the config file, then overridden by CLI flags / env vars.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from default location, or defaults if there is no file
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            tracing::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Config file path (XDG on Linux, Application Support on macOS, AppData on Windows)
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("smartmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the TUI sends its logs while it owns the terminal
    pub fn log_path() -> crate::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("smartmark");

        Ok(data_dir.join("smartmark.log"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database holding the bookmark slot
    /// Defaults to <data_dir>/smartmark/smartmark.db
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Name of the slot the bookmark list lives under
    #[serde(default = "default_slot_key")]
    pub key: String,
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            key: default_slot_key(),
        }
    }
}

impl StorageConfig {
    /// The configured database path, or the platform data dir default
    pub fn resolved_db_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("smartmark");

        Ok(data_dir.join("smartmark.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays on screen
    #[serde(default = "default_toast_millis")]
    pub toast_millis: u64,

    /// Category preselected in the add form, one of the fixed set
    #[serde(
        default = "default_category",
        deserialize_with = "deserialize_known_category"
    )]
    pub default_category: Category,

    /// Enable mouse capture in the TUI
    #[serde(default)]
    pub mouse_enabled: bool,
}

fn default_toast_millis() -> u64 {
    2000
}

fn default_category() -> Category {
    Category::Ai
}

fn deserialize_known_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_millis: default_toast_millis(),
            default_category: default_category(),
            mouse_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.key, "smart-bookmarks");
        assert!(config.storage.db_path.is_none());
        assert_eq!(config.ui.toast_millis, 2000);
        assert_eq!(config.ui.default_category, Category::Ai);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("toast_millis"));
        assert!(toml.contains("default_category = \"AI\""));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[ui]\ndefault_category = \"Dev\"\n").unwrap();
        assert_eq!(config.ui.default_category, Category::Dev);
        assert_eq!(config.ui.toast_millis, 2000);
        assert_eq!(config.storage.key, "smart-bookmarks");
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("smartmark").join("config.toml");

        let mut config = Config::default();
        config.storage.db_path = Some(dir.path().join("bookmarks.db"));
        config.ui.toast_millis = 500;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.toast_millis, 500);
        assert_eq!(
            loaded.storage.resolved_db_path().unwrap(),
            dir.path().join("bookmarks.db")
        );
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded.ui.toast_millis, 2000);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(crate::Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_default_category_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ndefault_category = \"Recipes\"\n").unwrap();

        match Config::load_from(&path) {
            Err(crate::Error::ConfigError(message)) => {
                assert!(message.contains("Unknown category: Recipes"), "{}", message)
            }
            other => panic!("expected config error, got {:?}", other),
        }

        // Names are case-sensitive
        assert!(toml::from_str::<Config>("[ui]\ndefault_category = \"ai\"\n").is_err());
    }
}
