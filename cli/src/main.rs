//! PortScope CLI - Inspect bound sockets and signal their processes
//!
//! A command-line tool for listing TCP/UDP sockets, terminating the
//! processes that own them, and choosing a free port for a local service.

mod commands;
mod logging;
mod state;

use clap::{Parser, Subcommand};
use portscope_core::{ConfigStore, PortScopeEngine};

#[derive(Parser)]
#[command(name = "portscope")]
#[command(author, version, about = "Inspect bound sockets and signal their processes")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read configuration from this file instead of ~/.portscope/config.json
    #[arg(long, global = true, env = "PORTSCOPE_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all bound TCP and UDP sockets
    #[command(alias = "ls")]
    List {
        /// Filter by local port number
        #[arg(short, long)]
        port: Option<u16>,

        /// Filter by text (process name, user, address, command)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Filter by owning PID
        #[arg(long)]
        pid: Option<u32>,

        /// Filter by protocol (TCP or UDP)
        #[arg(long)]
        protocol: Option<String>,
    },

    /// Send SIGTERM (or SIGKILL with --force) to a process
    Kill {
        /// Process ID to signal
        #[arg(required_unless_present = "port", conflicts_with = "port")]
        pid: Option<u32>,

        /// Signal every process bound to this local port instead
        #[arg(short, long)]
        port: Option<u16>,

        /// Force kill (SIGKILL) without graceful shutdown
        #[arg(short, long)]
        force: bool,
    },

    /// Pick a free port for a local service, remembering the choice
    ///
    /// The port is stored beside the config file and returned unchanged by
    /// later runs until --forget is given.
    Port {
        /// Host to bind
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// First port to try
        #[arg(long, env = "PORT")]
        preferred: Option<u16>,

        /// Drop the remembered port and probe again
        #[arg(long)]
        forget: bool,
    },

    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Set one value and save it (e.g. `config set preferredPort 8080`)
    Set {
        /// Key as it appears in config.json
        key: String,

        /// New value, read as JSON when possible
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    let command = cli.command.unwrap_or(Commands::List {
        port: None,
        name: None,
        pid: None,
        protocol: None,
    });

    let engine = || PortScopeEngine::from_store(&store);

    match command {
        Commands::List {
            port,
            name,
            pid,
            protocol,
        } => commands::list::run(&engine()?, port, name, pid, protocol, cli.json)?,
        Commands::Kill { pid, port, force } => {
            commands::kill::run(&engine()?, pid, port, force, cli.json)?
        }
        Commands::Port {
            host,
            preferred,
            forget,
        } => commands::port::run(&engine()?, &store, host, preferred, forget, cli.json)?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&engine()?, &store, cli.json)?,
            ConfigAction::Set { key, value } => {
                commands::config::set(&engine()?, &store, &key, &value, cli.json)?
            }
        },
    }

    Ok(())
}
