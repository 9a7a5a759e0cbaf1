use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use accounts::accounts_config::AppConfig;
use accounts::accounts_db::{PgUserRepository, init_db_pool};
use accounts::logging::init_tracing;
use accounts::metrics::init_metrics;
use accounts::router::init_router;
use accounts::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = init_db_pool(&config.database).await?;
    let users = Arc::new(PgUserRepository::new(pool));
    let state = AppState::from_config(&config, users);

    let metrics = if config.server.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };
    let app = init_router(state, metrics);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;
    Ok(())
}
