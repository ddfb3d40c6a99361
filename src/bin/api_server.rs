// Yield estimator HTTP server
//
// Usage: PORT=3000 ESTIMATOR_SEED=42 cargo run --bin api_server

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yield_estimator::config::{ServerConfig, DEFAULT_LOG_FILTER};
use yield_estimator::{create_router, AppState};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!(port = config.port, seed = ?config.seed, "loaded configuration");

    let app = create_router(AppState::new(config.seed));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Yield estimator listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
