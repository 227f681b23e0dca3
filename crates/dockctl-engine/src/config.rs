use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Engine facade configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine CLI binary, e.g. `docker` or `podman`
    pub binary: String,
    /// Shell used to interpret command lines
    pub shell: String,
    /// Emit every raw command result on the debug channel
    pub debug: bool,
    /// Treat a name that matches several containers as an error
    pub strict_names: bool,
    /// Options used by `ps` when the caller passes none
    pub ps_options: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            shell: "sh".to_string(),
            debug: false,
            strict_names: false,
            ps_options: "-a".to_string(),
        }
    }
}

impl EngineConfig {
    /// Configuration for the Podman CLI
    pub fn podman() -> Self {
        Self {
            binary: "podman".to_string(),
            ..Default::default()
        }
    }

    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_owned();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "engine binary must not be empty".to_string(),
            ));
        }
        if self.shell.trim().is_empty() {
            return Err(EngineError::ConfigError("shell must not be empty".to_string()));
        }
        Ok(())
    }
}
