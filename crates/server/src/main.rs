use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine::Engine;
use server::api;
use server::store::PositionStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;
use tracing::info;

/// Best-move HTTP service with a sqlite position cache.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Sqlite database file backing the position cache
    #[arg(long, default_value = "chess.db")]
    db: String,

    /// Search depth in plies
    #[arg(long, default_value_t = 5)]
    depth: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", args.db))
        .context("invalid database path")?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("failed to open position cache")?;
    let store = PositionStore::new(pool)
        .await
        .context("failed to initialize position cache schema")?;

    let app = api::router(store, Arc::new(Engine::new()), args.depth);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, depth = args.depth, db = %args.db, "listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
