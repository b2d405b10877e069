//! Server bootstrap: argument parsing, logging, store open, listen.

use clap::Parser;
use estoque::{api, ProductStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A validated, file-backed product record store with a REST API.
#[derive(Debug, Parser)]
#[command(name = "estoque", version, about)]
struct Args {
    /// Path of the JSON snapshot file.
    #[arg(long, default_value = "produtos.json")]
    data: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> estoque::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(ProductStore::open_or_create(&args.data)?);
    let app = api::router(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, data = %args.data.display(), "servidor online");
    axum::serve(listener, app).await?;

    Ok(())
}
