//! Command-line interface for the irhub remote-control backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use irhub_commands::{CommandDispatcher, CommandRequest, HttpTransmitter};
use irhub_core::config::{clamp_history_limit, env_vars, ServerConfig};
use irhub_core::{CommandHistoryLog, DeviceId};
use irhub_storage::RemoteStore;

/// irhub - universal IR remote backend.
#[derive(Parser, Debug)]
#[command(name = "irhub")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the web server.
    Serve {
        /// Host to bind to.
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to.
        #[arg(short, long)]
        port: Option<u16>,
        /// Database file.
        #[arg(long)]
        db: Option<PathBuf>,
        /// TOML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Press one button on a device and print the report.
    Send {
        /// Device id.
        device_id: DeviceId,
        /// Button name, e.g. `power`.
        command: String,
        /// Database file.
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print recent command history.
    History {
        /// Number of entries.
        #[arg(short, long)]
        limit: Option<usize>,
        /// Database file.
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Serve {
            host,
            port,
            db,
            config,
        } => run_server(config, host, port, db).await,
        Command::Send {
            device_id,
            command,
            db,
        } => send_command(device_id, command, db).await,
        Command::History { limit, db } => show_history(limit, db),
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("irhub=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("irhub=info"))
    };

    if env_vars::log_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Config precedence: file, then environment, then flags.
fn resolve_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db: Option<PathBuf>,
) -> Result<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    }
    .with_env();

    if host.is_some() || port.is_some() {
        let current = config.bind_addr()?;
        let host = host.unwrap_or_else(|| current.ip().to_string());
        let port = port.unwrap_or_else(|| current.port());
        config.bind = format!("{}:{}", host, port);
    }
    if let Some(db) = db {
        config.db_path = db;
    }
    config.validate()?;
    Ok(config)
}

async fn run_server(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config, host, port, db)?;
    irhub_api::run(config).await
}

async fn send_command(device_id: DeviceId, command: String, db: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(None, None, None, db)?;
    let store = Arc::new(RemoteStore::open(&config.db_path)?);
    let transmitter = Arc::new(HttpTransmitter::with_timeout(config.transmitter_timeout())?);
    let dispatcher = CommandDispatcher::from_store(store, transmitter);

    let report = dispatcher
        .dispatch(&CommandRequest::new(device_id, command))
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn show_history(limit: Option<usize>, db: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(None, None, None, db)?;
    let store = RemoteStore::open(&config.db_path)?;
    let history = store.recent(history_page(limit, &config))?;
    println!("{}", serde_json::to_string_pretty(&history)?);
    Ok(())
}

/// Entries to show. An absent or zero `--limit` uses the configured default.
fn history_page(limit: Option<usize>, config: &ServerConfig) -> usize {
    match limit {
        None | Some(0) => config.history_limit,
        Some(limit) => clamp_history_limit(Some(limit)),
    }
}
