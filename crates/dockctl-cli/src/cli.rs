use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dockctl",
    about = "Drive a container engine through its command line",
    version = env!("CARGO_PKG_VERSION"),
    long_about = "Runs docker (or a compatible CLI such as podman) commands and prints their decoded output as JSON or plain lines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Engine binary to invoke, overriding the configuration
    #[arg(short, long, value_name = "BIN")]
    pub engine: Option<String>,

    /// Log every raw engine command result
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format (json, plain)
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List containers
    Ps {
        /// Options passed to `ps` (defaults to the configured ones)
        #[arg(long, allow_hyphen_values = true)]
        options: Option<String>,
    },

    /// List images
    Images {
        /// Only list this image
        image: Option<String>,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Show the full inspect record of a container
    Inspect {
        container: String,

        /// Only print the value at this dotted path, e.g. State.Running
        #[arg(long)]
        field: Option<String>,
    },

    /// One resource usage sample
    Stats {
        /// Container to sample (all running containers if omitted)
        container: Option<String>,
    },

    /// Start a container
    Start { container: String },

    /// Stop a container
    Stop { container: String },

    /// Restart a container
    Restart { container: String },

    /// Kill a container
    Kill {
        container: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Pause a container
    Pause { container: String },

    /// Unpause a container
    Unpause { container: String },

    /// Remove a container
    Rm {
        container: String,

        /// Remove a running container
        #[arg(short, long)]
        force: bool,
    },

    /// Force-remove a container
    Delete { container: String },

    /// Rename a container
    Rename { container: String, name: String },

    /// Create a container without starting it
    Create {
        image: String,

        /// Container name; prefixed with a hash and sanitized
        #[arg(short, long)]
        name: Option<String>,

        /// Name prefix instead of a random four digit hash
        #[arg(long)]
        hash: Option<String>,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Create and start a detached container
    Run {
        image: String,

        /// Container name; prefixed with a hash and sanitized
        #[arg(short, long)]
        name: Option<String>,

        /// Name prefix instead of a random four digit hash
        #[arg(long)]
        hash: Option<String>,

        /// Shell command run through /bin/sh -c
        #[arg(long)]
        command: Option<String>,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,

        /// Reuse an existing container with the same name
        #[arg(long, requires = "hash")]
        reuse: bool,
    },

    /// Run a command in a running container
    Exec {
        container: String,
        command: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Fetch container logs
    Logs {
        container: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Show filesystem changes of a container
    Diff { container: String },

    /// Update container resources
    Update {
        container: String,

        #[arg(long, allow_hyphen_values = true)]
        options: String,
    },

    /// Commit a container to a new image
    Commit {
        container: String,

        /// Target image (repository[:tag])
        image: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Remove an image
    Rmi {
        image: String,

        #[arg(short, long)]
        force: bool,
    },

    /// Engine-wide information
    Info,

    /// Engine client and server versions
    Version,

    /// Exit successfully only if the container is running
    IsRunning { container: String },

    /// Compact listings
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Clone, Debug)]
pub enum SummaryCommands {
    /// Id, image, ports, status and names per container
    Ps {
        #[arg(long, allow_hyphen_values = true)]
        options: Option<String>,
    },

    /// Image, age and size per image
    Images {
        image: Option<String>,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
    },

    /// Memory and CPU usage per container
    Stats { container: Option<String> },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Plain => "plain",
        }
    }
}
