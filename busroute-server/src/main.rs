use busroute_core::create_transit_model;
use busroute_server::cli::Cli;
use busroute_server::{AppState, ServerError, create_router};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // `log` records from the routing core reach this subscriber too
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    info!(
        "Loading bus catalogue from {}",
        config.catalogue_path.display()
    );
    let model = create_transit_model(&config.transit_model_config())?;
    info!(
        "Loaded {} stops and {} buses",
        model.stop_count(),
        model.bus_count()
    );

    let app = create_router(AppState::new(model), &config);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("Bus route planner listening on http://{}", config.listen);
    info!("  GET /health");
    info!("  GET /route?from=<stop>&to=<stop>");
    info!("  GET /bus/<name>");
    info!("  GET /stop/<name>");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
