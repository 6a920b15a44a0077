//! Config Store (v1)
//!
//! An HTTP service storing named JSON configuration documents.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────────────────────────────────────────────────┐
//!     ───────────────────┼─▶ http (axum)  ──▶ service ──▶ validation (regex)    │
//!                        │                      │                                │
//!                        │                      ▼                                │
//!                        │   document (paths) ◀─ store ──▶ storage (fs/memory)  │
//!                        │                                                       │
//!                        │   Cross-cutting: config, observability, lifecycle     │
//!                        └──────────────────────────────────────────────────────┘
//! ```
//!
//! Routes:
//! - `POST /v1/config-create/{name}`: create or replace a document
//! - `GET  /v1/read/{name}/{path...}`: read a field
//! - `POST /v1/update`: validate and write a field
//! - `POST /v1/create-validate/{name}`: create a validator

use std::path::PathBuf;

use clap::Parser;

use config_store::config::{load_config, ServiceConfig};
use config_store::lifecycle::{signals, startup, Shutdown};

#[derive(Parser)]
#[command(name = "config-store", version)]
#[command(about = "JSON configuration store with regex validation", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    startup::run(config, server_shutdown).await?;
    Ok(())
}
