use clap::Parser;
use colored::*;
use std::io;
use std::process;

use dockctl_cli::{Cli, CommandHandler, ConfigManager};
use dockctl_engine::EngineClient;

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config_manager = match ConfigManager::new(cli.config.clone()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if let Err(e) = config_manager.apply_overrides(cli.engine.as_deref(), cli.debug) {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }

    let client = EngineClient::new(config_manager.into_config());
    let mut handler = CommandHandler::new(client);
    handler.set_output_format(cli.format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = handler.execute(cli.command, &mut out) {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    if quiet {
        return;
    }

    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
