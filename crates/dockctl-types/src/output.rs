//! Raw command results and the outcome of scalar engine operations

use serde::{Deserialize, Serialize};

/// Captured output of one engine invocation. Not retained beyond the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Standard output, one entry per line
    pub lines: Vec<String>,
    /// Standard error, one entry per line
    pub stderr: Vec<String>,
}

impl CommandResult {
    pub fn new(status: Option<i32>, lines: Vec<String>, stderr: Vec<String>) -> Self {
        Self {
            status,
            lines,
            stderr,
        }
    }

    /// Successful exit with the given stdout lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: Some(0),
            lines: lines.into_iter().map(Into::into).collect(),
            stderr: Vec::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Nothing on stdout and nothing on stderr
    pub fn is_silent(&self) -> bool {
        self.lines.is_empty() && self.stderr.is_empty()
    }

    /// Stdout followed by stderr
    pub fn output(&self) -> Vec<String> {
        self.lines.iter().chain(self.stderr.iter()).cloned().collect()
    }
}

/// Result of an operation whose success is judged from its output
///
/// The raw lines are always kept so that callers can report what the engine
/// said when `success` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub output: Vec<String>,
}

impl CommandOutcome {
    pub fn succeeded(output: Vec<String>) -> Self {
        Self {
            success: true,
            output,
        }
    }

    pub fn failed(output: Vec<String>) -> Self {
        Self {
            success: false,
            output,
        }
    }

    /// Failure reported when there was no identifier to act on; no command ran
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn first_line(&self) -> Option<&str> {
        self.output.first().map(String::as_str)
    }
}
