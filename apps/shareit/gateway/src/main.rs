use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod client;
mod config;
mod dto;
mod openapi;

use client::ServerClient;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let client = ServerClient::new(&config.upstream)
        .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;
    info!(upstream = %config.upstream.base_url, "Forwarding to ShareIt server");

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(client.clone()))?;

    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(client));

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Shutting down: no connections to close");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareIt gateway shutdown complete");
    Ok(())
}
