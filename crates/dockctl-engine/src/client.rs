//! Stateless catalogue of engine operations
//!
//! Each operation renders one command line from a fixed template plus the
//! caller's arguments, runs it, and decodes the output with the codec that
//! matches the verb. Options strings are appended verbatim.

use dockctl_types::{CommandOutcome, CommandResult, Record, RecordSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::codec;
use crate::command::CommandLine;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::naming::sanitize;
use crate::runner::{CommandRunner, ShellRunner};

const JSON_TEMPLATE: &str = "{{json .}}";

const PS_SUMMARY_TEMPLATE: &str = r#""{{.ID}}":{"id":"{{.ID}}","image":"{{.Image}}","created":"{{.CreatedAt}}","ports":"{{.Ports}}","status":"{{.Status}}","names":"{{.Names}}"}"#;
const IMAGES_SUMMARY_TEMPLATE: &str = r#""{{.ID}}":{"image":"{{.Repository}}:{{.Tag}}","created":"{{.CreatedSince}}","size":"{{.Size}}"}"#;
const STATS_SUMMARY_TEMPLATE: &str = r#""{{.Container}}":{"ID":"{{.Container}}","memory":{"raw":"{{.MemUsage}}","percent":"{{.MemPerc}}"},"cpu":"{{.CPUPerc}}"}"#;

/// Key field of `inspect` records
pub const INSPECT_KEY: &str = "Id";
/// Key field of `ps`, `images` and `stats` records
pub const LISTING_KEY: &str = "ID";

#[derive(Clone)]
pub struct EngineClient {
    config: EngineConfig,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for EngineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EngineClient {
    /// Client that runs commands through the configured shell
    pub fn new(config: EngineConfig) -> Self {
        let runner = Arc::new(ShellRunner::new(&config.shell));
        Self { config, runner }
    }

    pub fn with_runner(config: EngineConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self, verb: &str) -> CommandLine {
        CommandLine::new(&self.config.binary, verb)
    }

    fn execute(&self, command: CommandLine) -> Result<CommandResult> {
        let line = command.render();
        let result = self.runner.run(&line)?;

        if self.config.debug {
            info!(
                target: "dockctl::debug",
                command = %line,
                status = ?result.status,
                stdout = ?result.lines,
                stderr = ?result.stderr,
                "engine command result"
            );
        }

        if !result.success() && result.is_silent() {
            return Err(EngineError::process(
                line,
                format!("exited with status {:?} without output", result.status),
            ));
        }
        Ok(result)
    }

    fn echo(&self, command: CommandLine, unique: &str) -> Result<CommandOutcome> {
        let result = self.execute(command)?;
        Ok(codec::echo_outcome(&result, unique))
    }

    fn single_line(&self, command: CommandLine) -> Result<CommandOutcome> {
        let result = self.execute(command)?;
        if result.lines.len() == 1 {
            Ok(CommandOutcome::succeeded(result.output()))
        } else {
            debug!("Expected one output line, got {}", result.lines.len());
            Ok(CommandOutcome::failed(result.output()))
        }
    }

    /// Stdout of a listing command
    ///
    /// A failed command with nothing on stdout is an engine failure, except
    /// when the engine only says the addressed object does not exist, which
    /// is no result.
    fn listing_output(&self, command: CommandLine) -> Result<Option<Vec<String>>> {
        let line = command.render();
        let result = self.execute(command)?;

        let stdout_blank = result.lines.iter().all(|l| l.trim().is_empty());
        if !result.success() && stdout_blank {
            if result.stderr.iter().any(|l| l.to_ascii_lowercase().contains("no such")) {
                debug!("Engine reports no such object for: {}", line);
                return Ok(None);
            }
            return Err(EngineError::process(line, result.stderr.join("\n")));
        }
        Ok(Some(result.lines))
    }

    fn listing(&self, command: CommandLine, key: &str) -> Result<Option<RecordSet>> {
        let Some(lines) = self.listing_output(command)? else {
            return Ok(None);
        };
        Ok(codec::decode_lines(&lines, key))
    }

    fn fragments(&self, command: CommandLine, context: &str) -> Result<Option<RecordSet>> {
        let Some(lines) = self.listing_output(command)? else {
            return Ok(None);
        };
        codec::decode_fragments(&lines, context)
    }

    /// Start a stopped container
    pub fn start(&self, unique: &str) -> Result<CommandOutcome> {
        self.echo(self.command("start").arg(unique).merged(), unique)
    }

    pub fn restart(&self, unique: &str) -> Result<CommandOutcome> {
        self.echo(self.command("restart").arg(unique).merged(), unique)
    }

    pub fn stop(&self, unique: &str) -> Result<CommandOutcome> {
        self.echo(self.command("stop").arg(unique).merged(), unique)
    }

    /// `Some(true)`/`Some(false)` for an existing container, `None` when the
    /// engine does not know it
    pub fn is_running(&self, unique: &str) -> Result<Option<bool>> {
        let result = self.execute(
            self.command("inspect")
                .arg("--format='{{.State.Running}}'")
                .arg(unique)
                .merged(),
        )?;

        if result.lines.len() != 1 {
            return Ok(None);
        }
        Ok(match result.lines[0].trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        })
    }

    /// Create a container; on success the only output line is the new id
    pub fn create(&self, image: &str, name: Option<&str>, options: &str) -> Result<CommandOutcome> {
        let name_flag = name_flag(name);
        self.single_line(
            self.command("create")
                .arg(&name_flag)
                .arg(options)
                .arg(image)
                .merged(),
        )
    }

    /// Create and start a detached container, optionally running `command`
    /// through `/bin/sh -c`
    pub fn run(
        &self,
        image: &str,
        name: Option<&str>,
        command: Option<&str>,
        options: &str,
    ) -> Result<CommandOutcome> {
        let name_flag = name_flag(name);
        let shell_command = command
            .filter(|c| !c.trim().is_empty())
            .map(|c| format!("/bin/sh -c {}", c))
            .unwrap_or_default();
        self.single_line(
            self.command("run")
                .arg("-d")
                .arg(&name_flag)
                .arg(options)
                .arg(image)
                .arg(&shell_command),
        )
    }

    /// Remove a container; a running one needs `-f` in `options`
    pub fn rm(&self, unique: &str, options: &str) -> Result<CommandOutcome> {
        self.echo(self.command("rm").arg(options).arg(unique).merged(), unique)
    }

    pub fn kill(&self, unique: &str, options: &str) -> Result<CommandOutcome> {
        self.echo(self.command("kill").arg(options).arg(unique).merged(), unique)
    }

    /// Force-remove a container
    pub fn delete(&self, unique: &str) -> Result<CommandOutcome> {
        self.rm(unique, "-f")
    }

    /// Rename a container to the sanitized form of `name`
    pub fn rename(&self, unique: &str, name: &str) -> Result<CommandOutcome> {
        let result = self.execute(self.command("rename").arg(unique).arg(&sanitize(name)))?;
        if result.lines.is_empty() && result.success() {
            Ok(CommandOutcome::succeeded(result.output()))
        } else {
            Ok(CommandOutcome::failed(result.output()))
        }
    }

    pub fn inspect(&self, unique: &str, options: &str) -> Result<Option<RecordSet>> {
        self.listing(
            self.command("inspect").arg(options).format(JSON_TEMPLATE).arg(unique),
            INSPECT_KEY,
        )
    }

    pub fn logs(&self, unique: &str, options: &str) -> Result<Vec<String>> {
        let result = self.execute(self.command("logs").arg(options).arg(unique).merged())?;
        Ok(result.lines)
    }

    /// One stats sample for `unique`, or for every running container
    pub fn stats(&self, unique: Option<&str>) -> Result<Option<RecordSet>> {
        self.listing(
            self.command("stats")
                .arg("--no-stream --no-trunc")
                .format(JSON_TEMPLATE)
                .arg(unique.unwrap_or_default()),
            LISTING_KEY,
        )
    }

    /// Run `command` inside a running container; `None` if it does not exist
    pub fn exec(&self, unique: &str, command: &str, options: &str) -> Result<Option<Vec<String>>> {
        let result = self.execute(
            self.command("exec")
                .arg(options)
                .arg(unique)
                .arg(command)
                .merged(),
        )?;

        match result.first_line() {
            Some(line) if codec::is_no_such_container(line, unique) => Ok(None),
            _ => Ok(Some(result.lines)),
        }
    }

    pub fn update(&self, unique: &str, options: &str) -> Result<CommandOutcome> {
        self.echo(self.command("update").arg(options).arg(unique).merged(), unique)
    }

    pub fn pause(&self, unique: &str) -> Result<CommandOutcome> {
        self.echo(self.command("pause").arg(unique).merged(), unique)
    }

    pub fn unpause(&self, unique: &str) -> Result<CommandOutcome> {
        self.echo(self.command("unpause").arg(unique).merged(), unique)
    }

    /// Commit a container to `image` (`repository[:tag]`)
    ///
    /// Succeeds when the engine echoes the container or prints the new image
    /// digest.
    pub fn commit(&self, unique: &str, image: &str, options: &str) -> Result<CommandOutcome> {
        let result = self.execute(
            self.command("commit")
                .arg(options)
                .arg(unique)
                .arg(image)
                .merged(),
        )?;

        let digest = result.success()
            && result
                .first_line()
                .map_or(false, |line| line.starts_with("sha256:"));
        if codec::echo_matches(&result, unique) || digest {
            Ok(CommandOutcome::succeeded(result.output()))
        } else {
            Ok(CommandOutcome::failed(result.output()))
        }
    }

    pub fn diff(&self, unique: &str) -> Result<Vec<String>> {
        let result = self.execute(self.command("diff").arg(unique).merged())?;
        Ok(result.lines)
    }

    /// List containers; `None` options fall back to the configured default
    pub fn ps(&self, options: Option<&str>) -> Result<Option<RecordSet>> {
        let options = options.unwrap_or(self.config.ps_options.as_str());
        self.listing(self.command("ps").arg(options).format(JSON_TEMPLATE), LISTING_KEY)
    }

    pub fn images(&self, options: &str, image: &str) -> Result<Option<RecordSet>> {
        self.listing(
            self.command("images")
                .arg(options)
                .arg("--no-trunc --digests")
                .format(JSON_TEMPLATE)
                .arg(image),
            LISTING_KEY,
        )
    }

    /// Remove an image
    pub fn rmi(&self, image: &str, options: &str) -> Result<CommandOutcome> {
        let result = self.execute(self.command("rmi").arg(options).arg(image).merged())?;
        let reported_error = result
            .first_line()
            .map_or(false, |line| line.starts_with("Error"));
        if reported_error || !result.success() {
            Ok(CommandOutcome::failed(result.output()))
        } else {
            Ok(CommandOutcome::succeeded(result.output()))
        }
    }

    pub fn info(&self) -> Result<Record> {
        let result = self.execute(self.command("info").format(JSON_TEMPLATE))?;
        codec::decode_document(&result.lines, "info")
    }

    pub fn version(&self) -> Result<Record> {
        let result = self.execute(self.command("version").format(JSON_TEMPLATE))?;
        codec::decode_document(&result.lines, "version")
    }

    /// Compact container listing keyed by container id
    pub fn ps_summary(&self, options: Option<&str>) -> Result<Option<RecordSet>> {
        let options = options.unwrap_or(self.config.ps_options.as_str());
        self.fragments(self.command("ps").arg(options).format(PS_SUMMARY_TEMPLATE), "ps")
    }

    /// Compact image listing keyed by image id
    pub fn images_summary(&self, options: &str, image: &str) -> Result<Option<RecordSet>> {
        self.fragments(
            self.command("images")
                .arg(options)
                .format(IMAGES_SUMMARY_TEMPLATE)
                .arg(image),
            "images",
        )
    }

    /// Memory and CPU usage keyed by container
    pub fn stats_summary(&self, unique: Option<&str>) -> Result<Option<RecordSet>> {
        self.fragments(
            self.command("stats")
                .arg("--no-stream")
                .format(STATS_SUMMARY_TEMPLATE)
                .arg(unique.unwrap_or_default()),
            "stats",
        )
    }

    /// Full id of the container addressed by id or name
    pub fn resolve_id(&self, unique: &str) -> Result<Option<String>> {
        let result = self.execute(self.command("inspect").format("{{.ID}}").arg(unique))?;
        if !result.success() {
            return Ok(None);
        }
        Ok(result
            .first_line()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned))
    }

    /// Ids of containers named exactly `name`, in engine listing order
    ///
    /// The engine's name filter is a regex match, so its answer is checked
    /// again against each record's `Names`.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<String>> {
        let filter = format!("--filter 'name=^{}$'", regex::escape(name));
        let listing = self.listing(
            self.command("ps")
                .arg("-a --no-trunc")
                .arg(&filter)
                .format(JSON_TEMPLATE),
            LISTING_KEY,
        )?;
        Ok(listing
            .map(|set| {
                set.iter()
                    .filter(|(_, record)| codec::has_name(record, name))
                    .map(|(id, _)| id.to_owned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn name_flag(name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| format!("--name {}", n))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Runner {}
        impl CommandRunner for Runner {
            fn run(&self, command_line: &str) -> Result<CommandResult>;
        }
    }

    fn client_expecting(command: impl Into<String>, result: CommandResult) -> EngineClient {
        let command = command.into();
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .withf(move |line| line == command)
            .times(1)
            .returning(move |_| Ok(result.clone()));
        EngineClient::with_runner(EngineConfig::default(), Arc::new(runner))
    }

    fn failed(lines: &[&str]) -> CommandResult {
        CommandResult::new(Some(1), lines.iter().map(|l| l.to_string()).collect(), vec![])
    }

    #[test]
    fn test_rm_echo_success() {
        let client = client_expecting("docker rm abc123 2>&1", CommandResult::from_lines(["abc123"]));
        let outcome = client.rm("abc123", "").unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn test_kill_reports_raw_lines_on_failure() {
        let client = client_expecting(
            "docker kill -s HUP abc123 2>&1",
            failed(&["Error: no such container: abc123"]),
        );
        let outcome = client.kill("abc123", "-s HUP").unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.first_line(), Some("Error: no such container: abc123"));
    }

    #[test]
    fn test_delete_forces_removal() {
        let client = client_expecting("docker rm -f web 2>&1", CommandResult::from_lines(["web"]));
        assert!(client.delete("web").unwrap().success);
    }

    #[test]
    fn test_is_running_tri_state() {
        let client = client_expecting(
            "docker inspect --format='{{.State.Running}}' web 2>&1",
            CommandResult::from_lines(["false"]),
        );
        assert_eq!(client.is_running("web").unwrap(), Some(false));

        let client = client_expecting(
            "docker inspect --format='{{.State.Running}}' web 2>&1",
            CommandResult::from_lines(["true"]),
        );
        assert_eq!(client.is_running("web").unwrap(), Some(true));

        let client = client_expecting(
            "docker inspect --format='{{.State.Running}}' ghost 2>&1",
            failed(&["", "Error: No such object: ghost"]),
        );
        assert_eq!(client.is_running("ghost").unwrap(), None);
    }

    #[test]
    fn test_create_returns_single_id_line() {
        let client = client_expecting(
            "docker create --name 1234.web -p 80:80 nginx 2>&1",
            CommandResult::from_lines(["f00dcafe"]),
        );
        let outcome = client.create("nginx", Some("1234.web"), "-p 80:80").unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.first_line(), Some("f00dcafe"));
    }

    #[test]
    fn test_create_with_pull_noise_fails() {
        let client = client_expecting(
            "docker create nginx 2>&1",
            CommandResult::from_lines(["Unable to find image 'nginx:latest' locally", "f00dcafe"]),
        );
        assert!(!client.create("nginx", None, "").unwrap().success);
    }

    #[test]
    fn test_run_wraps_command_in_shell() {
        let client = client_expecting(
            "docker run -d --name app alpine /bin/sh -c 'sleep 60'",
            CommandResult::from_lines(["beef"]),
        );
        let outcome = client.run("alpine", Some("app"), Some("'sleep 60'"), "").unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn test_rename_sanitizes_and_expects_silence() {
        let client = client_expecting("docker rename web newname", CommandResult::from_lines(Vec::<String>::new()));
        assert!(client.rename("web", "new name!").unwrap().success);

        let client = client_expecting(
            "docker rename web other",
            CommandResult::new(Some(1), vec![], vec!["Error: No such container: web".to_string()]),
        );
        let outcome = client.rename("web", "other").unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output, vec!["Error: No such container: web".to_string()]);
    }

    #[test]
    fn test_inspect_keys_by_id() {
        let client = client_expecting(
            "docker inspect --format '{{json .}}' web",
            CommandResult::from_lines([r#"{"Id":"c0ffee","Name":"/web"}"#]),
        );
        let records = client.inspect("web", "").unwrap().unwrap();
        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["c0ffee"]);
    }

    #[test]
    fn test_exec_missing_container() {
        let client = client_expecting(
            "docker exec ghost ls 2>&1",
            failed(&["Error: No such container: ghost"]),
        );
        assert_eq!(client.exec("ghost", "ls", "").unwrap(), None);

        let client = client_expecting(
            "docker exec -i web ls / 2>&1",
            CommandResult::from_lines(["bin", "etc"]),
        );
        assert_eq!(
            client.exec("web", "ls /", "-i").unwrap(),
            Some(vec!["bin".to_string(), "etc".to_string()])
        );
    }

    #[test]
    fn test_commit_accepts_digest() {
        let client = client_expecting(
            "docker commit web backup:1 2>&1",
            CommandResult::from_lines(["sha256:9a1c"]),
        );
        assert!(client.commit("web", "backup:1", "").unwrap().success);

        let client = client_expecting(
            "docker commit ghost backup:1 2>&1",
            failed(&["Error response from daemon: No such container: ghost"]),
        );
        assert!(!client.commit("ghost", "backup:1", "").unwrap().success);
    }

    #[test]
    fn test_pause_and_update_return_outcome() {
        let client = client_expecting("docker pause web 2>&1", failed(&["Error: web is not running"]));
        let outcome = client.pause("web").unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output.len(), 1);

        let client = client_expecting("docker update --memory 256m web 2>&1", CommandResult::from_lines(["web"]));
        assert!(client.update("web", "--memory 256m").unwrap().success);
    }

    #[test]
    fn test_ps_uses_configured_default_options() {
        let client = client_expecting(
            "docker ps -a --format '{{json .}}'",
            CommandResult::from_lines([r#"{"ID":"a1","Names":"web"}"#, r#"{"ID":"b2","Names":"db"}"#]),
        );
        let listing = client.ps(None).unwrap().unwrap();
        assert_eq!(listing.keys().collect::<Vec<_>>(), vec!["a1", "b2"]);
    }

    #[test]
    fn test_ps_empty_listing_is_no_result() {
        let client = client_expecting("docker ps --format '{{json .}}'", CommandResult::from_lines(Vec::<String>::new()));
        assert_eq!(client.ps(Some("")).unwrap(), None);
    }

    #[test]
    fn test_images_template() {
        let client = client_expecting(
            "docker images --no-trunc --digests --format '{{json .}}' nginx",
            CommandResult::from_lines([r#"{"ID":"sha256:1","Repository":"nginx"}"#]),
        );
        let listing = client.images("", "nginx").unwrap().unwrap();
        assert!(listing.contains_key("sha256:1"));
    }

    #[test]
    fn test_rmi_error_detection() {
        let client = client_expecting("docker rmi nginx 2>&1", CommandResult::from_lines(["Untagged: nginx:latest"]));
        assert!(client.rmi("nginx", "").unwrap().success);

        let client = client_expecting(
            "docker rmi nginx 2>&1",
            failed(&["Error response from daemon: conflict: unable to remove repository reference"]),
        );
        assert!(!client.rmi("nginx", "").unwrap().success);
    }

    #[test]
    fn test_info_decodes_document() {
        let client = client_expecting(
            "docker info --format '{{json .}}'",
            CommandResult::from_lines([r#"{"ID":"host","Containers":2}"#]),
        );
        assert_eq!(client.info().unwrap()["Containers"], 2);
    }

    #[test]
    fn test_version_malformed_is_decode_error() {
        let client = client_expecting(
            "docker version --format '{{json .}}'",
            CommandResult::from_lines(["Client: Docker Engine"]),
        );
        assert!(matches!(client.version().unwrap_err(), EngineError::Decode { .. }));
    }

    #[test]
    fn test_silent_failure_is_process_error() {
        let client = client_expecting("docker info --format '{{json .}}'", CommandResult::new(Some(127), vec![], vec![]));
        assert!(matches!(client.info().unwrap_err(), EngineError::Process { .. }));
    }

    #[test]
    fn test_stats_summary_assembles_fragments() {
        let client = client_expecting(
            format!("docker stats --no-stream --format '{}' web", STATS_SUMMARY_TEMPLATE),
            CommandResult::from_lines([
                r#""web":{"ID":"web","memory":{"raw":"10MiB / 1GiB","percent":"0.98%"},"cpu":"0.10%"}"#,
            ]),
        );
        let summary = client.stats_summary(Some("web")).unwrap().unwrap();
        assert_eq!(summary.get("web").unwrap()["cpu"], "0.10%");
    }

    #[test]
    fn test_resolve_id() {
        let client = client_expecting("docker inspect --format '{{.ID}}' web", CommandResult::from_lines(["c0ffee"]));
        assert_eq!(client.resolve_id("web").unwrap(), Some("c0ffee".to_string()));

        let client = client_expecting(
            "docker inspect --format '{{.ID}}' ghost",
            CommandResult::new(Some(1), vec![String::new()], vec!["Error: No such object: ghost".to_string()]),
        );
        assert_eq!(client.resolve_id("ghost").unwrap(), None);
    }

    #[test]
    fn test_find_by_name_filters_exactly() {
        let client = client_expecting(
            "docker ps -a --no-trunc --filter 'name=^web$' --format '{{json .}}'",
            CommandResult::from_lines([r#"{"ID":"c0ffee","Names":"web"}"#]),
        );
        assert_eq!(client.find_by_name("web").unwrap(), vec!["c0ffee".to_string()]);
    }

    #[test]
    fn test_find_by_name_escapes_and_rechecks_names() {
        let client = client_expecting(
            r"docker ps -a --no-trunc --filter 'name=^1234\.web$' --format '{{json .}}'",
            CommandResult::from_lines([
                r#"{"ID":"near","Names":"1234xweb"}"#,
                r#"{"ID":"alias","Names":"other,1234.web"}"#,
                r#"{"ID":"exact","Names":"1234.web"}"#,
            ]),
        );
        assert_eq!(
            client.find_by_name("1234.web").unwrap(),
            vec!["alias".to_string(), "exact".to_string()]
        );
    }

    #[test]
    fn test_unreachable_engine_is_process_error() {
        let client = client_expecting(
            "docker ps -a --format '{{json .}}'",
            CommandResult::new(
                Some(1),
                vec![],
                vec!["Cannot connect to the Docker daemon at unix:///var/run/docker.sock.".to_string()],
            ),
        );
        match client.ps(None).unwrap_err() {
            EngineError::Process { message, .. } => assert!(message.contains("Cannot connect")),
            other => panic!("unexpected error {:?}", other),
        }

        let client = client_expecting(
            format!("docker stats --no-stream --format '{}'", STATS_SUMMARY_TEMPLATE),
            CommandResult::new(Some(1), vec![String::new()], vec!["permission denied".to_string()]),
        );
        assert!(matches!(client.stats_summary(None).unwrap_err(), EngineError::Process { .. }));
    }

    #[test]
    fn test_inspect_missing_object_is_no_result() {
        let client = client_expecting(
            "docker inspect --format '{{json .}}' ghost",
            CommandResult::new(Some(1), vec![String::new()], vec!["Error: No such object: ghost".to_string()]),
        );
        assert_eq!(client.inspect("ghost", "").unwrap(), None);
    }

    #[test]
    fn test_empty_name_is_omitted() {
        let client = client_expecting("docker create nginx 2>&1", CommandResult::from_lines(["f00d"]));
        assert!(client.create("nginx", Some(""), "").unwrap().success);

        let client = client_expecting("docker run -d nginx", CommandResult::from_lines(["f00d"]));
        assert!(client.run("nginx", Some("  "), None, "").unwrap().success);
    }

    #[test]
    fn test_configured_binary() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .withf(|line| line == "podman start web 2>&1")
            .times(1)
            .returning(|_| Ok(CommandResult::from_lines(["web"])));
        let client = EngineClient::with_runner(EngineConfig::podman(), Arc::new(runner));
        assert!(client.start("web").unwrap().success);
    }
}
