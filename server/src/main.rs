//! Bookshelf server: reads settings, picks the store, mounts the API.
//!
//! Run from repo root: `cargo run -p bookshelf-server`

use bookshelf::{app, apply_migrations, ensure_database_exists, AppState, BookStore, MemoryBookStore, PgBookStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf=info,bookshelf_server=info,tower_http=info")),
        )
        .init();

    let store = build_store(&settings).await?;
    let app = app(AppState::new(store));

    let listener = TcpListener::bind(settings.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_store(settings: &Settings) -> Result<Arc<dyn BookStore>, Box<dyn std::error::Error>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; books are kept in memory and lost on exit");
        return Ok(Arc::new(MemoryBookStore::new()));
    };
    if settings.create_database {
        ensure_database_exists(database_url).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(database_url)
        .await?;
    apply_migrations(&pool).await?;
    tracing::info!(max_connections = settings.max_connections, "using postgres store");
    Ok(Arc::new(PgBookStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
