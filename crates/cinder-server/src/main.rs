//! Cinder storage service daemon.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cinder_core::SystemEnv;
use cinder_server::{Driver, MemoryStore, RedbStore, Store, serve};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Cinder storage service.
///
/// Stores encrypted message blobs it cannot read, enforces expiry, and
/// answers the paste wire protocol over TCP.
#[derive(Parser, Debug)]
#[command(name = "cinder-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Listen address
    #[arg(short, long, env = "CINDER_LISTEN_ADDR", default_value = "127.0.0.1:7171")]
    listen: String,

    /// Path to the message database
    #[arg(short, long, env = "CINDER_DB_PATH", default_value = "cinder.redb")]
    db: PathBuf,

    /// Keep messages in memory only (no persistence)
    #[arg(long, env = "CINDER_MEMORY_ONLY", default_value = "false")]
    memory: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CINDER_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn setup_logging(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let subscriber =
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;
    Ok(())
}

async fn run<S: Store>(listen: &str, store: S) -> Result<()> {
    let listener =
        TcpListener::bind(listen).await.with_context(|| format!("cannot bind {listen}"))?;
    tracing::info!(addr = listen, "listening");

    let driver = Driver::new(store, SystemEnv::new());
    serve(listener, driver).await.context("accept loop failed")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level)?;

    if args.memory {
        tracing::info!("using in-memory store (no persistence)");
        return run(&args.listen, MemoryStore::new()).await;
    }

    match RedbStore::open(&args.db) {
        Ok(store) => {
            tracing::info!(db = %args.db.display(), "using redb store");
            run(&args.listen, store).await
        },
        Err(err) => {
            // Mirror of the development fallback: a broken database path
            // degrades to ephemeral storage instead of refusing to start
            tracing::warn!(error = %err, "cannot open database, falling back to in-memory store");
            run(&args.listen, MemoryStore::new()).await
        },
    }
}
