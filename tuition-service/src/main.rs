use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;
use std::sync::Arc;
use tracing::info;
use tuition_service::config::get_configuration;
use tuition_service::services::store::Store;
use tuition_service::startup::build_router;
use tuition_service::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration()?;

    init_tracing("tuition-service", "info", true);

    tuition_service::services::metrics::init_metrics();

    let store = Arc::new(Store::open(&configuration.store.data_dir).await?);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );

    let app = build_router(AppState::new(configuration, store));

    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting tuition-service on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
