//! Watchlist API server binary entrypoint.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use watchlist_common::config::AppConfig;
use watchlist_common::db::{create_pool, run_migrations};
use watchlist_engine::store::PgAccountStore;

use watchlist_api::routes::create_router;
use watchlist_api::state::AppState;

/// Request bodies only ever carry a single address.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("watchlist_api=debug,watchlist_engine=debug,tower_http=debug")
    });
    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting Watchlist API server...");

    // Create database connection pool
    let pool = create_pool(&config).await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    // Build application state
    let state = AppState::new(Arc::new(PgAccountStore::new(pool.clone())));

    // Build router
    let app = create_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    pool.close().await;
    tracing::info!("Watchlist API server stopped.");
    Ok(())
}
