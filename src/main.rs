//! Clinic Router server binary.
//!
//! Loads configuration from the environment, wires the router and the
//! in-memory session store into the HTTP adapter, and serves `/api/triage`.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clinic_router::adapters::{build_app, InMemoryTriageSessionRepository, TriageAppState};
use clinic_router::config::AppConfig;
use clinic_router::domain::routing::ClinicRouter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let addr = config.server.socket_addr()?;
    let router = ClinicRouter::new(config.routing.router_settings());
    let state = TriageAppState::new(
        router,
        config.routing.flag_policy,
        Arc::new(InMemoryTriageSessionRepository::new()),
    );
    let app = build_app(state, &config.server);

    tracing::info!(
        environment = ?config.server.environment,
        flag_policy = ?config.routing.flag_policy,
        max_age_years = config.routing.max_age_years,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
