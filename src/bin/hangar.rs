use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hangar::{http, CollectionItem, Config, InMemoryItemStore, ItemService};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hangar: collection status service",
    long_about = None
)]
struct Args {
    /// Path to the TOML config file. Missing file means defaults.
    #[arg(short, long, default_value = "hangar.toml")]
    config: PathBuf,

    /// Address to listen on, overriding `[server] bind`.
    #[arg(short, long)]
    bind: Option<String>,

    /// JSON array of catalog items to load at startup.
    #[arg(long)]
    seed: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HANGAR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("hangar=info,warn"));

    let format = env::var("HANGAR_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn load_seed(path: &Path) -> Result<Vec<CollectionItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(&args.config)?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let store = Arc::new(InMemoryItemStore::new());
    if let Some(seed) = &args.seed {
        // Seed before the service is built so a counter allocator starts
        // after the seeded wishlist.
        let staging = ItemService::new(store.clone())
            .with_default_status(config.items.default_status);
        let count = staging.import(load_seed(seed)?)?;
        info!(count, path = %seed.display(), "seeded catalog");
    }

    let service = Arc::new(ItemService::from_config(store, &config)?);

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, allocator = ?config.priority.allocator, "hangar listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
