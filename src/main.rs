//! Taskboard server binary.
//!
//! Startup sequence: wait for the store to become reachable, initialize
//! the schema, then serve HTTP. Startup failures are fatal; the process
//! never accepts traffic against an unreachable or uninitialized store.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;
use taskboard::config::{DEFAULT_WAIT_ATTEMPTS, DEFAULT_WAIT_DELAY_MS, HttpConfig, StoreConfig};
use taskboard::db::{Database, provision, schema};
use taskboard::web;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Task-tracking web server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port for the HTTP server (overrides HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Maximum store connection attempts at startup
    #[arg(long, default_value_t = DEFAULT_WAIT_ATTEMPTS)]
    wait_attempts: u32,

    /// Delay between startup connection attempts, in milliseconds
    #[arg(long, default_value_t = DEFAULT_WAIT_DELAY_MS)]
    wait_delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let store_config = StoreConfig::from_env();
    let mut http_config = HttpConfig::from_env();
    if let Some(port) = cli.port {
        http_config.port = port;
    }

    info!(
        "Starting taskboard v{} (store {}:{}, database {})",
        env!("CARGO_PKG_VERSION"),
        store_config.host,
        store_config.port,
        store_config.database
    );

    // Block until the store accepts connections; exhausting the retry
    // budget is fatal.
    provision::wait_for_server(
        &store_config.server_url(),
        cli.wait_attempts,
        Duration::from_millis(cli.wait_delay_ms),
    )
    .await?;

    // One-shot, idempotent schema initialization.
    schema::ensure_database(&store_config).await?;
    let db = Database::connect(&store_config.url()).await?;
    schema::ensure_tasks_table(&db).await?;
    info!("Database initialized successfully");

    web::start_server(Arc::new(db), &http_config).await
}
