//! Stateful handle for one container
//!
//! A [`ManagedContainer`] is a local proxy, not the container itself: its
//! cached record can go stale and is only refreshed by [`ManagedContainer::inspect`].
//!
//! ```text
//! Unbound --get_id()--> Resolving --one or more matches--> Bound --rm/delete--> Removed
//!    ^                      |
//!    +------ no match ------+
//! ```

use dockctl_types::{field_path, CommandOutcome, Identity, Record, RecordSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::client::EngineClient;
use crate::error::{EngineError, Result};
use crate::naming::{disambiguate, sanitize};

/// Where a handle stands relative to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleState {
    /// No id known yet
    Unbound,
    /// An id lookup by name is in progress
    Resolving,
    /// Id known and cached
    Bound,
    /// The container was removed through this handle
    Removed,
}

/// What to create: image plus optional name, hash, command and ports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub image: String,
    pub name: Option<String>,
    /// Name prefix; a random four digit hash is used when absent
    pub hash: Option<String>,
    /// Shell command passed to `/bin/sh -c` by `run`
    pub command: Option<String>,
    pub exposed_ports: BTreeSet<String>,
    pub debug: bool,
}

impl ContainerSpec {
    pub fn new(image: &str) -> Self {
        Self {
            image: image.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = Some(hash.to_owned());
        self
    }

    pub fn with_command(mut self, command: &str) -> Self {
        self.command = Some(command.to_owned());
        self
    }

    pub fn with_exposed_port(mut self, port: &str) -> Self {
        self.exposed_ports.insert(port.to_owned());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ManagedContainer {
    client: EngineClient,
    identity: Option<Identity>,
    state: HandleState,
    name: Option<String>,
    image: Option<String>,
    command: Option<String>,
    exposed_ports: BTreeSet<String>,
    record: Option<Record>,
    debug: bool,
}

impl ManagedContainer {
    /// Handle for a container yet to be created
    ///
    /// A requested name is prefixed with the spec's hash (or a random one)
    /// and sanitized.
    pub fn new(client: EngineClient, spec: ContainerSpec) -> Self {
        let name = spec
            .name
            .as_deref()
            .map(|name| disambiguate(name, spec.hash.as_deref()));
        let client = client.with_debug(spec.debug);

        Self {
            client,
            identity: name.clone().map(Identity::Name),
            state: HandleState::Unbound,
            name,
            image: Some(spec.image),
            command: spec.command,
            exposed_ports: spec.exposed_ports,
            record: None,
            debug: spec.debug,
        }
    }

    /// Handle bound to a known id
    pub fn by_id(client: EngineClient, id: &str) -> Self {
        let debug = client.config().debug;
        Self {
            client,
            identity: Some(Identity::Id(id.to_owned())),
            state: HandleState::Bound,
            name: None,
            image: None,
            command: None,
            exposed_ports: BTreeSet::new(),
            record: None,
            debug,
        }
    }

    /// Handle for an existing container known by its exact name
    pub fn by_name(client: EngineClient, name: &str) -> Self {
        let debug = client.config().debug;
        Self {
            client,
            identity: Some(Identity::Name(name.to_owned())),
            state: HandleState::Unbound,
            name: Some(name.to_owned()),
            image: None,
            command: None,
            exposed_ports: BTreeSet::new(),
            record: None,
            debug,
        }
    }

    /// Look a container up by id or name and populate a handle from its
    /// inspect record; `None` if the engine does not know it
    pub fn open(client: EngineClient, unique: &str) -> Result<Option<Self>> {
        let Some(id) = client.resolve_id(unique)? else {
            debug!("No container matches {}", unique);
            return Ok(None);
        };

        let mut container = Self::by_id(client, &id);
        if let Some(record) = container.fetch_record(&id)? {
            container.adopt_record(&record);
            container.record = Some(record);
        }
        Ok(Some(container))
    }

    /// Bind to the container named by `spec` if it exists, otherwise run it
    ///
    /// Only idempotent when the spec carries an explicit hash; a random hash
    /// yields a fresh name every time.
    pub fn open_or_run(client: EngineClient, spec: ContainerSpec, options: &str) -> Result<Self> {
        let mut container = Self::new(client, spec);
        if container.get_id()?.is_none() {
            let outcome = container.run(options)?;
            if !outcome.success {
                warn!(
                    "Failed to run {}: {}",
                    container.image.as_deref().unwrap_or_default(),
                    outcome.output.join(" ")
                );
                return Ok(container);
            }
        }
        container.inspect()?;
        Ok(container)
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Id if already bound, without asking the engine
    pub fn cached_id(&self) -> Option<&str> {
        self.identity.as_ref().and_then(Identity::id)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Override the local name; nothing is sent to the engine
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(sanitize(name));
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: &str) {
        self.image = Some(image.to_owned());
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn set_command(&mut self, command: &str) {
        self.command = Some(command.to_owned());
    }

    pub fn exposed_ports(&self) -> &BTreeSet<String> {
        &self.exposed_ports
    }

    pub fn set_exposed_ports(&mut self, ports: BTreeSet<String>) {
        self.exposed_ports = ports;
    }

    /// Last inspect result
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        self.client = self.client.clone().with_debug(debug);
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state == HandleState::Removed {
            let identity = self
                .identity
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "container".to_string());
            return Err(EngineError::StaleHandle(identity));
        }
        Ok(())
    }

    /// Resolve the container id, asking the engine by name when unbound
    ///
    /// Zero matches leave the handle unbound and return `None`. Several
    /// matches bind to the first in engine listing order, unless the client
    /// is configured with `strict_names`.
    pub fn get_id(&mut self) -> Result<Option<String>> {
        self.ensure_live()?;

        let name = match &self.identity {
            Some(Identity::Id(id)) => return Ok(Some(id.clone())),
            Some(Identity::Name(name)) => name.clone(),
            None => return Ok(None),
        };

        self.state = HandleState::Resolving;
        let matches = match self.client.find_by_name(&name) {
            Ok(matches) => matches,
            Err(e) => {
                self.state = HandleState::Unbound;
                return Err(e);
            }
        };

        let Some(first) = matches.first().cloned() else {
            debug!("No container named {}", name);
            self.state = HandleState::Unbound;
            return Ok(None);
        };

        if matches.len() > 1 {
            if self.client.config().strict_names {
                self.state = HandleState::Unbound;
                return Err(EngineError::AmbiguousName {
                    name,
                    matches: matches.len(),
                });
            }
            warn!(
                "{} containers are named {}, using the first listed ({})",
                matches.len(),
                name,
                first
            );
        }

        self.bind(first.clone());
        Ok(Some(first))
    }

    fn bind(&mut self, id: String) {
        debug!("Bound container handle to {}", id);
        self.identity = Some(Identity::Id(id));
        self.state = HandleState::Bound;
    }

    fn mark_removed(&mut self) {
        info!(
            "Container {} removed",
            self.identity.as_ref().map(ToString::to_string).unwrap_or_default()
        );
        self.state = HandleState::Removed;
        self.record = None;
    }

    fn report(&self, verb: &str, outcome: &CommandOutcome) {
        if self.debug {
            info!(
                target: "dockctl::debug",
                verb,
                success = outcome.success,
                output = ?outcome.output,
                "container verb outcome"
            );
        }
    }

    /// Resolve the id and hand it to `action`; without an id nothing is run
    fn with_id<T>(
        &mut self,
        verb: &str,
        unresolved: T,
        action: impl FnOnce(&EngineClient, &str) -> Result<T>,
    ) -> Result<T> {
        match self.get_id()? {
            Some(id) => action(&self.client, &id),
            None => {
                debug!("Skipping {}: container id is not resolved", verb);
                Ok(unresolved)
            }
        }
    }

    fn verb(
        &mut self,
        verb: &str,
        action: impl FnOnce(&EngineClient, &str) -> Result<CommandOutcome>,
    ) -> Result<CommandOutcome> {
        let outcome = self.with_id(verb, CommandOutcome::unresolved(), action)?;
        self.report(verb, &outcome);
        Ok(outcome)
    }

    /// Create the container from the handle's image and name
    pub fn create(&mut self, options: &str) -> Result<CommandOutcome> {
        self.ensure_live()?;
        let Some(image) = self.creatable_image() else {
            return Ok(CommandOutcome::unresolved());
        };

        let outcome = self.client.create(&image, self.name.as_deref(), options)?;
        self.bind_from(&outcome);
        self.report("create", &outcome);
        Ok(outcome)
    }

    /// Create and start the container, running the handle's command if set
    pub fn run(&mut self, options: &str) -> Result<CommandOutcome> {
        self.ensure_live()?;
        let Some(image) = self.creatable_image() else {
            return Ok(CommandOutcome::unresolved());
        };

        let outcome = self
            .client
            .run(&image, self.name.as_deref(), self.command.as_deref(), options)?;
        self.bind_from(&outcome);
        self.report("run", &outcome);
        Ok(outcome)
    }

    fn creatable_image(&self) -> Option<String> {
        if self.cached_id().is_some() {
            debug!("Container is already bound, not creating another");
            return None;
        }
        if self.image.is_none() {
            debug!("No image set, cannot create a container");
        }
        self.image.clone()
    }

    fn bind_from(&mut self, outcome: &CommandOutcome) {
        if outcome.success {
            if let Some(id) = outcome.first_line() {
                self.bind(id.trim().to_owned());
            }
        }
    }

    pub fn start(&mut self) -> Result<CommandOutcome> {
        self.verb("start", |client, id| client.start(id))
    }

    pub fn stop(&mut self) -> Result<CommandOutcome> {
        self.verb("stop", |client, id| client.stop(id))
    }

    pub fn restart(&mut self) -> Result<CommandOutcome> {
        self.verb("restart", |client, id| client.restart(id))
    }

    pub fn kill(&mut self, options: &str) -> Result<CommandOutcome> {
        self.verb("kill", |client, id| client.kill(id, options))
    }

    pub fn pause(&mut self) -> Result<CommandOutcome> {
        self.verb("pause", |client, id| client.pause(id))
    }

    pub fn unpause(&mut self) -> Result<CommandOutcome> {
        self.verb("unpause", |client, id| client.unpause(id))
    }

    pub fn update(&mut self, options: &str) -> Result<CommandOutcome> {
        self.verb("update", |client, id| client.update(id, options))
    }

    pub fn commit(&mut self, image: &str, options: &str) -> Result<CommandOutcome> {
        self.verb("commit", |client, id| client.commit(id, image, options))
    }

    /// `None` when the container is unknown to the engine or not resolvable
    pub fn is_running(&mut self) -> Result<Option<bool>> {
        self.with_id("is_running", None, |client, id| client.is_running(id))
    }

    pub fn logs(&mut self, options: &str) -> Result<Option<Vec<String>>> {
        self.with_id("logs", None, |client, id| client.logs(id, options).map(Some))
    }

    pub fn diff(&mut self) -> Result<Option<Vec<String>>> {
        self.with_id("diff", None, |client, id| client.diff(id).map(Some))
    }

    pub fn exec(&mut self, command: &str, options: &str) -> Result<Option<Vec<String>>> {
        self.with_id("exec", None, |client, id| client.exec(id, command, options))
    }

    pub fn stats(&mut self) -> Result<Option<RecordSet>> {
        self.with_id("stats", None, |client, id| client.stats(Some(id)))
    }

    /// Rename the container; the sanitized name is kept locally on success
    pub fn rename(&mut self, name: &str) -> Result<CommandOutcome> {
        let outcome = self.verb("rename", |client, id| client.rename(id, name))?;
        if outcome.success {
            self.name = Some(sanitize(name));
        }
        Ok(outcome)
    }

    /// Remove the container; on success the handle becomes stale
    pub fn rm(&mut self, options: &str) -> Result<CommandOutcome> {
        let outcome = self.verb("rm", |client, id| client.rm(id, options))?;
        if outcome.success {
            self.mark_removed();
        }
        Ok(outcome)
    }

    /// Force-remove the container
    pub fn delete(&mut self) -> Result<CommandOutcome> {
        let outcome = self.verb("delete", |client, id| client.delete(id))?;
        if outcome.success {
            self.mark_removed();
        }
        Ok(outcome)
    }

    fn fetch_record(&self, id: &str) -> Result<Option<Record>> {
        let Some(records) = self.client.inspect(id, "")? else {
            return Ok(None);
        };
        let record = match records.get(id) {
            Some(record) => Some(record.clone()),
            None => records.first().map(|(_, record)| record.clone()),
        };
        Ok(record)
    }

    /// Refresh the cached record
    ///
    /// Fields the caller already set (name, image, command, ports) are kept;
    /// only missing ones are filled from the record.
    pub fn inspect(&mut self) -> Result<Option<&Record>> {
        let Some(id) = self.get_id()? else {
            return Ok(None);
        };

        match self.fetch_record(&id)? {
            Some(record) => {
                let fields = InspectedFields::from_record(&record);
                if self.name.is_none() {
                    self.name = fields.name;
                }
                if self.image.is_none() {
                    self.image = fields.image;
                }
                if self.command.is_none() {
                    self.command = fields.command;
                }
                if self.exposed_ports.is_empty() {
                    self.exposed_ports = fields.exposed_ports;
                }
                self.record = Some(record);
            }
            None => debug!("Inspect returned nothing for {}", id),
        }
        Ok(self.record.as_ref())
    }

    /// Overwrite name, image, command and ports with the values in `record`
    pub fn adopt_record(&mut self, record: &Record) {
        let fields = InspectedFields::from_record(record);
        self.name = fields.name.or(self.name.take());
        self.image = fields.image.or(self.image.take());
        self.command = fields.command;
        self.exposed_ports = fields.exposed_ports;
    }
}

/// Fields of an inspect record the handle tracks
#[derive(Debug, Default, PartialEq)]
struct InspectedFields {
    name: Option<String>,
    image: Option<String>,
    command: Option<String>,
    exposed_ports: BTreeSet<String>,
}

impl InspectedFields {
    fn from_record(record: &Record) -> Self {
        let name = field_path(record, "Name")
            .and_then(Value::as_str)
            .map(|name| name.trim_start_matches('/').to_owned())
            .filter(|name| !name.is_empty());

        let image = field_path(record, "Config.Image")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let command = match field_path(record, "Config.Cmd") {
            Some(Value::Array(parts)) => {
                let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            Some(Value::String(command)) => Some(command.clone()),
            _ => None,
        };

        let exposed_ports = field_path(record, "Config.ExposedPorts")
            .and_then(Value::as_object)
            .map(|ports| ports.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            name,
            image,
            command,
            exposed_ports,
        }
    }
}
