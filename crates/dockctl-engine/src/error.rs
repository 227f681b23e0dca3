use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine command failed: {command}: {message}")]
    Process { command: String, message: String },

    #[error("Failed to decode {context} output: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Container not found: {0}")]
    NotFound(String),

    #[error("Container handle is stale, {0} was removed")]
    StaleHandle(String),

    #[error("Container name {name} is ambiguous: {matches} containers match")]
    AmbiguousName { name: String, matches: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl EngineError {
    pub fn process(command: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Process {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        EngineError::Decode {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
