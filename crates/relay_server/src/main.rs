use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use relay_core::KeywordCatalog;
use relay_engine::ReqwestFetcher;
use relay_logging::relay_info;
use relay_server::{logging, router, ServerConfig, ServerState};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(about = "Keyword lookup and streaming download relay")]
struct Args {
    /// RON config file; defaults apply when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ServerConfig::load(args.config.as_deref())?;
    logging::initialize(config.log_destination, &config.log_file);

    let raw = fs::read_to_string(&config.catalog_path)
        .with_context(|| format!("reading keyword data {}", config.catalog_path.display()))?;
    let catalog = KeywordCatalog::from_json_str(&raw)
        .with_context(|| format!("loading keyword data {}", config.catalog_path.display()))?;
    relay_info!("Loaded {} keywords", catalog.len());

    let fetcher = ReqwestFetcher::new(config.relay_settings())?;
    let state = ServerState::new(catalog, Arc::new(fetcher));

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    relay_info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
