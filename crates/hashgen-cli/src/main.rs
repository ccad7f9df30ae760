//! hashgen - crypto hash server
//!
//! Parses host/port flags, builds the HashService and serves it over HTTP
//! until a shutdown request (HTTP or signal) has drained every job.

mod http;
mod signal;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hashgen_core::ServiceBuilder;
use http::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "hashgen")]
#[command(version)]
#[command(about = "Starts crypto hash server")]
struct Args {
    /// Server host
    #[arg(long, env = "HASHGEN_HOST", default_value = "localhost")]
    host: String,

    /// Listen port
    #[arg(long, env = "HASHGEN_PORT", default_value_t = 8080)]
    port: u16,

    /// Processing delay applied to every hash, in milliseconds
    #[arg(long, env = "HASHGEN_HASH_DELAY_MS", default_value_t = 5000)]
    hash_delay_ms: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // RUST_LOG があればそちらを優先
    let filter = match args.verbose {
        0 => "info",
        1 => "info,hashgen_core=debug,hashgen=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let service = match ServiceBuilder::new()
        .hash_delay(Duration::from_millis(args.hash_delay_ms))
        .build()
    {
        Ok(service) => Arc::new(service),
        Err(e) => {
            eprintln!("hashgen: {e}");
            std::process::exit(2);
        }
    };

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "hash server listening");

    signal::install_shutdown_handler(Arc::clone(&service))?;

    let app = build_router(AppState {
        service: Arc::clone(&service),
    });
    axum::serve(listener, app)
        .with_graceful_shutdown(service.stopped())
        .await?;

    tracing::info!(stats = ?service.stats(), "hash server exited");
    Ok(())
}
