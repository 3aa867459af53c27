use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ubicaciones_service::{config::Config, create_router, services::MongoStore, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ubicaciones_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    let store = MongoStore::connect(&config.mongo_uri, config.mongo_database.as_deref())
        .await
        .context("Failed to create MongoDB client")?;

    let app = create_router(AppState::new(Arc::new(store)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Servidor corriendo en http://localhost:{}", config.port);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
