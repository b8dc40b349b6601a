// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keel - hosts a resource as a system service or from the console.
//!
//! This is the binary entry point.

mod example_server;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keel_config::KeelConfig;
use keel_core::{CapabilitySet, Hosted, ServiceError, ServiceHost};
use keel_host::{ConsoleHost, SignalHost};
use keel_install::Installer;
use tracing::{error, info};

use crate::example_server::ExampleServer;

/// Keel - hosts a resource as a system service or from the console.
#[derive(Parser, Debug)]
#[command(name = "keel", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as a background service, driven by process signals.
    Run {
        /// Start arguments passed to the resource.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Run interactively until Ctrl+C.
    Console {
        /// Start arguments passed to the resource.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Register the service with systemd.
    Install,
    /// Remove the service's systemd unit.
    Uninstall,
    /// Print the controls the hosted resource accepts.
    Capabilities,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            keel_config::render_errors(&errors);
            return ExitCode::from(1);
        }
    };

    init_tracing(&config.logging.level);
    install_panic_hook();

    let command = cli.command.unwrap_or_else(default_command);
    match execute(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "keel failed");
            eprintln!("keel: {e}");
            ExitCode::from(2)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<KeelConfig, Vec<keel_config::ConfigError>> {
    match path {
        Some(path) => keel_config::load_and_validate_path(path),
        None => keel_config::load_and_validate(),
    }
}

/// Console mode on a terminal, service mode otherwise.
fn default_command() -> Commands {
    if std::io::stdin().is_terminal() {
        Commands::Console { args: Vec::new() }
    } else {
        Commands::Run { args: Vec::new() }
    }
}

async fn execute(command: Commands, config: &KeelConfig) -> Result<(), ServiceError> {
    match command {
        Commands::Run { args } => {
            let host = SignalHost::new(&config.host);
            run_hosted(&host, config, args).await
        }
        Commands::Console { args } => run_hosted(&ConsoleHost::new(), config, args).await,
        Commands::Install => {
            let installer = Installer::for_current_exe(config)?;
            let path = installer.install(config)?;
            println!("Installed {} at {}", config.service.name, path.display());
            println!("Run `systemctl daemon-reload` to pick up the new unit.");
            Ok(())
        }
        Commands::Uninstall => {
            let installer = Installer::for_current_exe(config)?;
            let path = installer.uninstall(&config.service.name)?;
            println!("Removed {}", path.display());
            Ok(())
        }
        Commands::Capabilities => {
            print_capabilities(config);
            Ok(())
        }
        Commands::Config => {
            let rendered = keel_config::to_toml(config)
                .map_err(|e| ServiceError::Config(e.to_string()))?;
            print!("{rendered}");
            Ok(())
        }
    }
}

async fn run_hosted<H: ServiceHost>(
    host: &H,
    config: &KeelConfig,
    args: Vec<String>,
) -> Result<(), ServiceError> {
    let mut adapter = example_server::adapter(config)?;
    info!(
        service = %config.service.name,
        host = host.kind(),
        version = env!("CARGO_PKG_VERSION"),
        "keel starting"
    );
    host.run(&mut adapter, args).await
}

fn print_capabilities(config: &KeelConfig) {
    let accepted = ExampleServer::CAPABILITIES;
    println!("{}: {}", config.service.name, accepted);
    for capability in CapabilitySet::ALL.iter() {
        let name = capability.to_string();
        let mark = if accepted.contains(capability) { "yes" } else { "no" };
        println!("  {name:<16} {mark}");
    }
}

/// Initialize the tracing subscriber, honouring `RUST_LOG` when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.trim().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keel={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Log panics through tracing before the default hook prints them.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        error!(panic = %panic, "unhandled panic");
        default_hook(panic);
    }));
}
