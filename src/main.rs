use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use meevo_booking::config::AppConfig;
use meevo_booking::handlers;
use meevo_booking::services::auth::TokenCache;
use meevo_booking::services::salon::meevo::MeevoClient;
use meevo_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.client_id.is_empty() || config.client_secret.is_empty() {
        tracing::warn!("MEEVO_CLIENT_ID / MEEVO_CLIENT_SECRET not set, upstream calls will fail");
    }

    let salon = MeevoClient::new(&config)?;

    let state = Arc::new(AppState {
        config: config.clone(),
        salon: Box::new(salon),
        tokens: TokenCache::new(),
    });

    let app = Router::new()
        .route("/book", post(handlers::booking::book))
        .route("/health", get(handlers::health::health))
        .route("/services", get(handlers::services::list_services))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        location = %config.location_name,
        location_id = %config.location_id,
        "starting booking server on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
