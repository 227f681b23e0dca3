use dockctl_engine::{ContainerSpec, EngineClient, EngineError, ManagedContainer};
use dockctl_types::{field_path, CommandOutcome, Record, RecordSet};
use serde_json::Value;
use std::io::Write;
use tracing::debug;

use crate::cli::{Commands, OutputFormat, SummaryCommands};
use crate::error::{CliError, Result};

/// Runs one subcommand against the engine and writes its output
pub struct CommandHandler {
    client: EngineClient,
    output_format: OutputFormat,
}

impl CommandHandler {
    pub fn new(client: EngineClient) -> Self {
        Self {
            client,
            output_format: OutputFormat::Json,
        }
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn client(&self) -> &EngineClient {
        &self.client
    }

    pub fn execute(&self, command: Commands, out: &mut dyn Write) -> Result<()> {
        debug!("Executing {:?} with {} output", command, self.output_format.as_str());

        match command {
            Commands::Ps { options } => {
                let listing = self.client.ps(options.as_deref())?;
                self.write_records(out, listing.as_ref())
            }
            Commands::Images { image, options } => {
                let listing = self.client.images(&options, image.as_deref().unwrap_or_default())?;
                self.write_records(out, listing.as_ref())
            }
            Commands::Inspect { container, field } => self.inspect(out, &container, field.as_deref()),
            Commands::Stats { container } => {
                let sample = self.client.stats(container.as_deref())?;
                self.write_records(out, sample.as_ref())
            }
            Commands::Start { container } => {
                let outcome = self.client.start(&container)?;
                self.write_outcome(out, "start", outcome)
            }
            Commands::Stop { container } => {
                let outcome = self.client.stop(&container)?;
                self.write_outcome(out, "stop", outcome)
            }
            Commands::Restart { container } => {
                let outcome = self.client.restart(&container)?;
                self.write_outcome(out, "restart", outcome)
            }
            Commands::Kill { container, options } => {
                let outcome = self.client.kill(&container, &options)?;
                self.write_outcome(out, "kill", outcome)
            }
            Commands::Pause { container } => {
                let outcome = self.client.pause(&container)?;
                self.write_outcome(out, "pause", outcome)
            }
            Commands::Unpause { container } => {
                let outcome = self.client.unpause(&container)?;
                self.write_outcome(out, "unpause", outcome)
            }
            Commands::Rm { container, force } => {
                let outcome = self.client.rm(&container, if force { "-f" } else { "" })?;
                self.write_outcome(out, "rm", outcome)
            }
            Commands::Delete { container } => {
                let outcome = self.client.delete(&container)?;
                self.write_outcome(out, "delete", outcome)
            }
            Commands::Rename { container, name } => {
                let outcome = self.client.rename(&container, &name)?;
                self.write_outcome(out, "rename", outcome)
            }
            Commands::Create {
                image,
                name,
                hash,
                options,
            } => {
                let mut container = ManagedContainer::new(self.client.clone(), spec(&image, name, hash, None));
                let outcome = container.create(&options)?;
                self.write_outcome(out, "create", outcome)
            }
            Commands::Run {
                image,
                name,
                hash,
                command,
                options,
                reuse,
            } => self.run(out, spec(&image, name, hash, command), &options, reuse),
            Commands::Exec {
                container,
                command,
                options,
            } => match self.client.exec(&container, &command, &options)? {
                Some(lines) => self.write_lines(out, &lines),
                None => Err(EngineError::NotFound(container).into()),
            },
            Commands::Logs { container, options } => {
                let lines = self.client.logs(&container, &options)?;
                self.write_lines(out, &lines)
            }
            Commands::Diff { container } => {
                let lines = self.client.diff(&container)?;
                self.write_lines(out, &lines)
            }
            Commands::Update { container, options } => {
                let outcome = self.client.update(&container, &options)?;
                self.write_outcome(out, "update", outcome)
            }
            Commands::Commit {
                container,
                image,
                options,
            } => {
                let outcome = self.client.commit(&container, &image, &options)?;
                self.write_outcome(out, "commit", outcome)
            }
            Commands::Rmi { image, force } => {
                let outcome = self.client.rmi(&image, if force { "-f" } else { "" })?;
                self.write_outcome(out, "rmi", outcome)
            }
            Commands::Info => {
                let info = self.client.info()?;
                self.write_record(out, &info)
            }
            Commands::Version => {
                let version = self.client.version()?;
                self.write_record(out, &version)
            }
            Commands::IsRunning { container } => match self.client.is_running(&container)? {
                Some(running) => {
                    self.write_value(out, &Value::Bool(running))?;
                    if running {
                        Ok(())
                    } else {
                        Err(CliError::CommandFailed(format!("{} is not running", container)))
                    }
                }
                None => Err(EngineError::NotFound(container).into()),
            },
            Commands::Summary(summary) => self.summary(out, summary),
            Commands::Config => {
                let rendered = toml::to_string_pretty(self.client.config())?;
                write!(out, "{}", rendered)?;
                Ok(())
            }
        }
    }

    fn summary(&self, out: &mut dyn Write, command: SummaryCommands) -> Result<()> {
        let listing = match command {
            SummaryCommands::Ps { options } => self.client.ps_summary(options.as_deref())?,
            SummaryCommands::Images { image, options } => self
                .client
                .images_summary(&options, image.as_deref().unwrap_or_default())?,
            SummaryCommands::Stats { container } => self.client.stats_summary(container.as_deref())?,
        };
        self.write_records(out, listing.as_ref())
    }

    fn inspect(&self, out: &mut dyn Write, container: &str, field: Option<&str>) -> Result<()> {
        let handle = ManagedContainer::open(self.client.clone(), container)?
            .ok_or_else(|| EngineError::NotFound(container.to_owned()))?;
        let Some(record) = handle.record() else {
            return Err(EngineError::NotFound(container.to_owned()).into());
        };

        match field {
            Some(path) => match field_path(record, path) {
                Some(value) => self.write_value(out, value),
                None => Err(CliError::CommandFailed(format!("{} has no field {}", container, path))),
            },
            None => self.write_record(out, record),
        }
    }

    fn run(&self, out: &mut dyn Write, spec: ContainerSpec, options: &str, reuse: bool) -> Result<()> {
        if reuse {
            let container = ManagedContainer::open_or_run(self.client.clone(), spec, options)?;
            return match (container.cached_id(), container.record()) {
                (_, Some(record)) => self.write_record(out, record),
                (Some(id), None) => self.write_lines(out, &[id.to_owned()]),
                (None, None) => Err(CliError::CommandFailed(format!(
                    "run {} did not produce a container",
                    container.image().unwrap_or_default()
                ))),
            };
        }

        let mut container = ManagedContainer::new(self.client.clone(), spec);
        let outcome = container.run(options)?;
        self.write_outcome(out, "run", outcome)
    }

    fn write_outcome(&self, out: &mut dyn Write, verb: &str, outcome: CommandOutcome) -> Result<()> {
        match self.output_format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?,
            OutputFormat::Plain => {
                for line in &outcome.output {
                    writeln!(out, "{}", line)?;
                }
            }
        }

        if outcome.success {
            Ok(())
        } else {
            let detail = outcome.first_line().unwrap_or("no output from engine");
            Err(CliError::CommandFailed(format!("{}: {}", verb, detail)))
        }
    }

    fn write_records(&self, out: &mut dyn Write, records: Option<&RecordSet>) -> Result<()> {
        match self.output_format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?,
            OutputFormat::Plain => {
                for (key, record) in records.into_iter().flat_map(RecordSet::iter) {
                    writeln!(out, "{}\t{}", key, serde_json::to_string(record)?)?;
                }
            }
        }
        Ok(())
    }

    fn write_record(&self, out: &mut dyn Write, record: &Record) -> Result<()> {
        match self.output_format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(record)?)?,
            OutputFormat::Plain => {
                for (key, value) in record {
                    writeln!(out, "{}: {}", key, plain_value(value)?)?;
                }
            }
        }
        Ok(())
    }

    fn write_value(&self, out: &mut dyn Write, value: &Value) -> Result<()> {
        match self.output_format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
            OutputFormat::Plain => writeln!(out, "{}", plain_value(value)?)?,
        }
        Ok(())
    }

    fn write_lines(&self, out: &mut dyn Write, lines: &[String]) -> Result<()> {
        match self.output_format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(lines)?)?,
            OutputFormat::Plain => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Ok(())
    }
}

fn spec(image: &str, name: Option<String>, hash: Option<String>, command: Option<String>) -> ContainerSpec {
    ContainerSpec {
        name,
        hash,
        command,
        ..ContainerSpec::new(image)
    }
}

/// Strings print bare, everything else as compact JSON
fn plain_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}
