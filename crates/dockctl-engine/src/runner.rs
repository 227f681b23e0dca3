//! Execution of engine command lines
//!
//! Every other part of the crate reaches the engine through [`CommandRunner`];
//! nothing else spawns processes. Calls block until the engine exits and no
//! timeout is applied, so a hung engine hangs the caller.

use dockctl_types::CommandResult;
use std::process::Command;
use tracing::debug;

use crate::error::{EngineError, Result};

/// Runs one command line and captures its output
pub trait CommandRunner: Send + Sync {
    fn run(&self, command_line: &str) -> Result<CommandResult>;
}

/// Runs command lines through a shell, one process per call
///
/// The line is passed to the shell untouched, so redirections such as
/// `2>&1` in a template apply. Identifiers are not escaped.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: &str) -> Self {
        Self {
            shell: shell.to_owned(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<CommandResult> {
        debug!("Executing engine command: {}", command_line);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .output()
            .map_err(|e| EngineError::process(command_line, format!("failed to spawn {}: {}", self.shell, e)))?;

        Ok(CommandResult::new(
            output.status.code(),
            split_lines(&output.stdout),
            split_lines(&output.stderr),
        ))
    }
}

/// Split captured bytes into lines; only line terminators are removed
pub(crate) fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
