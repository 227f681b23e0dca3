//! Common types shared across dockctl crates
//!
//! This crate holds the data model produced by the engine facade so that
//! front ends (the CLI, embedding applications) do not need to depend on
//! the command-execution machinery.

pub mod identity;
pub mod output;
pub mod record;

pub use identity::*;
pub use output::*;
pub use record::*;
