//! Programmatic facade over a container engine's command line
//!
//! Builds engine invocations from fixed templates, runs them through a
//! [`CommandRunner`] and decodes their output into [`Record`]s and
//! [`RecordSet`]s. [`ManagedContainer`] adds a stateful handle with lazy id
//! resolution on top of the stateless [`EngineClient`].
//!
//! ```rust,no_run
//! use dockctl_engine::{ContainerSpec, EngineClient, EngineConfig, ManagedContainer};
//!
//! fn main() -> dockctl_engine::Result<()> {
//!     let client = EngineClient::new(EngineConfig::default());
//!     let mut web = ManagedContainer::new(client, ContainerSpec::new("nginx:latest").with_name("web"));
//!
//!     if web.run("-p 8080:80")?.success {
//!         println!("running: {:?}", web.is_running()?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod command;
pub mod config;
pub mod container;
pub mod error;
pub mod naming;
pub mod runner;

#[cfg(test)]
mod proptest;

pub use client::EngineClient;
pub use command::CommandLine;
pub use config::EngineConfig;
pub use container::{ContainerSpec, HandleState, ManagedContainer};
pub use error::{EngineError, Result};
pub use naming::{disambiguate, sanitize};
pub use runner::{CommandRunner, ShellRunner};

pub use dockctl_types::{CommandOutcome, CommandResult, Identity, Record, RecordSet};
