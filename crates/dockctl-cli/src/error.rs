use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Engine error: {0}")]
    EngineError(#[from] dockctl_engine::EngineError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
