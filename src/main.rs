// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::chart_repository::ChartRepository;
use crate::application::chart_service::ChartService;
use crate::infrastructure::config::load_service_config;
use crate::infrastructure::memory_repository::InMemoryChartRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_service_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn ChartRepository> = match &config.storage.snapshot_path {
        Some(path) => Arc::new(InMemoryChartRepository::open(path).await?),
        None => Arc::new(InMemoryChartRepository::new()),
    };

    // Create services (application layer)
    let chart_service = ChartService::new(repository);

    // Create application state
    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting chart configuration service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
