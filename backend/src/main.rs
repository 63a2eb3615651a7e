//! Backend entry-point: loads settings, wires adapters and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ward_ops::inbound::http::health::HealthState;
use ward_ops::settings::AppSettings;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let config = ServerConfig::from_settings(settings)?;
    info!(bind_addr = config.bind_addr(), "starting ward-ops");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await
}
