//! Settings configuration
//!
//! Manages user-configurable settings for the application.
//! Default values are defined in `config/default.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Configuration settings for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Field behavior settings
    pub field: FieldSettings,
    /// Store location settings
    pub store: StoreSettings,
    /// Backup settings
    pub backup: BackupSettings,
}

/// Behavior of the autocomplete fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Request a fresh completion immediately after a deletion.
    /// Off by default; the next keystroke triggers the lookup instead.
    #[serde(default)]
    pub resuggest_after_delete: bool,
    /// Appended after a key completion is accepted with Tab
    pub key_separator: String,
}

/// Where the table file lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Table file name, resolved under the data directory.
    /// An absolute path is used as-is.
    pub db_file: String,
}

/// Backup rotation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Whether the rotating backups run at all
    pub enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Parse user TOML content merged on top of default.toml.
fn parse_with_defaults(user_content: &str) -> Result<Settings> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let user: toml::Value = toml::from_str(user_content)?;
    merge_toml(&mut base, &user);
    let settings: Settings = base.try_into()?;
    Ok(settings)
}

/// Get the project directories for keyphrase.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "keyphrase", "keyphrase")
}

impl Settings {
    /// Get the data directory path
    pub fn data_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the backup directory path.
    ///
    /// Default: `<data_dir>/backups/`
    pub fn backup_dir() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("backups"))
    }

    /// Resolve the table file path from this configuration.
    ///
    /// Relative names land under the data directory.
    pub fn db_path(&self) -> Option<PathBuf> {
        let file = Path::new(&self.store.db_file);
        if file.is_absolute() {
            return Some(file.to_path_buf());
        }
        Self::data_dir().map(|dir| dir.join(file))
    }

    /// Load settings from the default configuration file.
    /// Falls back to embedded default.toml if the config file does not exist.
    pub fn load() -> Result<Self> {
        let Some(config_file) = Self::config_file() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !config_file.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", config_file);
        let content = fs::read_to_string(&config_file)?;
        parse_with_defaults(&content)
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_with_defaults(&content)
    }

    /// Save settings to the default configuration file
    pub fn save(&self) -> Result<()> {
        let Some(config_file) = Self::config_file() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&config_file)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Saving config to {:?}", path);
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.field.resuggest_after_delete);
        assert_eq!(settings.field.key_separator, " ");
        assert_eq!(settings.store.db_file, "phrases.json");
        assert!(settings.backup.enabled);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let loaded: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.store.db_file, settings.store.db_file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[field]
resuggest_after_delete = true

[backup]
enabled = false
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert!(settings.field.resuggest_after_delete);
        assert!(!settings.backup.enabled);
    }

    #[test]
    fn test_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[store]
db_file = "work.json"
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.store.db_file, "work.json");
        // Should use default for unspecified values
        assert_eq!(settings.field.key_separator, " ");
        assert!(settings.backup.enabled);
    }

    #[test]
    fn test_absolute_db_path_used_as_is() {
        let mut settings = Settings::default();
        settings.store.db_file = "/tmp/elsewhere/phrases.json".to_string();
        assert_eq!(
            settings.db_path().unwrap(),
            PathBuf::from("/tmp/elsewhere/phrases.json")
        );
    }

    #[test]
    fn test_relative_db_path_under_data_dir() {
        let settings = Settings::default();
        if let Some(path) = settings.db_path() {
            assert!(path.ends_with("phrases.json"));
        }
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.field.resuggest_after_delete = true;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.field.resuggest_after_delete);
    }
}
