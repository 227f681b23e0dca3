//! Command line templates

use std::fmt;

/// Engine command line assembled from fixed words and caller-supplied parts
///
/// Empty parts are skipped so optional options do not leave stray spaces.
/// Nothing is quoted: caller strings appear exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    parts: Vec<String>,
    merge_stderr: bool,
}

impl CommandLine {
    pub fn new(binary: &str, verb: &str) -> Self {
        Self {
            parts: vec![binary.to_owned(), verb.to_owned()],
            merge_stderr: false,
        }
    }

    pub fn arg(mut self, part: &str) -> Self {
        let part = part.trim();
        if !part.is_empty() {
            self.parts.push(part.to_owned());
        }
        self
    }

    /// `--format '<template>'`
    pub fn format(self, template: &str) -> Self {
        self.arg(&format!("--format '{}'", template))
    }

    /// Append `2>&1` so the engine's error messages reach the decoder
    pub fn merged(mut self) -> Self {
        self.merge_stderr = true;
        self
    }

    pub fn render(&self) -> String {
        let mut line = self.parts.join(" ");
        if self.merge_stderr {
            line.push_str(" 2>&1");
        }
        line
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_skips_empty_parts() {
        let line = CommandLine::new("docker", "rm").arg("").arg("  ").arg("abc123").merged();
        assert_eq!(line.render(), "docker rm abc123 2>&1");
    }

    #[test]
    fn test_format_template_is_single_quoted() {
        let line = CommandLine::new("docker", "ps").arg("-a").format("{{json .}}");
        assert_eq!(line.to_string(), "docker ps -a --format '{{json .}}'");
    }
}
