pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Commands, OutputFormat, SummaryCommands};
pub use commands::CommandHandler;
pub use config::ConfigManager;
pub use error::{CliError, Result};
