use dockctl_engine::EngineConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, Result};

/// Locates, loads and overrides the engine configuration
pub struct ConfigManager {
    config: EngineConfig,
    config_path: PathBuf,
    loaded: bool,
}

impl ConfigManager {
    /// Load from `config_path`, or from the per-user default location
    ///
    /// An explicitly given file must exist; a missing default file falls
    /// back to built-in defaults.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let explicit = config_path.is_some();
        let config_path = config_path.unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let config = Self::load_config(&config_path)?;
            debug!("Loaded configuration from {}", config_path.display());
            return Ok(Self {
                config,
                config_path,
                loaded: true,
            });
        }

        if explicit {
            return Err(CliError::ConfigError(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        debug!(
            "No configuration at {}, using defaults",
            config_path.display()
        );
        Ok(Self {
            config: EngineConfig::default(),
            config_path,
            loaded: false,
        })
    }

    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether the configuration came from a file
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&mut self, engine: Option<&str>, debug: bool) -> Result<()> {
        if let Some(engine) = engine {
            self.config.binary = engine.to_owned();
        }
        if debug {
            self.config.debug = true;
        }
        self.config.validate().map_err(CliError::from)
    }

    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("dockctl").join("config.toml")
        } else {
            PathBuf::from("/etc/dockctl/config.toml")
        }
    }

    fn load_config(path: &Path) -> Result<EngineConfig> {
        EngineConfig::load(path)
            .map_err(|e| CliError::ConfigError(format!("Failed to load {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "binary = \"podman\"\nstrict_names = true\n").unwrap();

        let manager = ConfigManager::new(Some(path.clone())).unwrap();
        assert!(manager.is_loaded());
        assert_eq!(manager.config_path(), path.as_path());
        assert_eq!(manager.get_config().binary, "podman");
        assert!(manager.get_config().strict_names);
        assert_eq!(manager.get_config().ps_options, "-a");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigManager::new(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "binary = \"\"\n").unwrap();

        assert!(matches!(ConfigManager::new(Some(path)), Err(CliError::ConfigError(_))));
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = false\n").unwrap();

        let mut manager = ConfigManager::new(Some(path)).unwrap();
        manager.apply_overrides(Some("podman"), true).unwrap();

        let config = manager.into_config();
        assert_eq!(config.binary, "podman");
        assert!(config.debug);
    }

    #[test]
    fn test_empty_engine_override_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let mut manager = ConfigManager::new(Some(path)).unwrap();
        assert!(matches!(
            manager.apply_overrides(Some(" "), false),
            Err(CliError::EngineError(_))
        ));
    }
}
