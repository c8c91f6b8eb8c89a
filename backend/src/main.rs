//! DeshiDwell entry-point: loads settings, builds the property store and
//! serves the REST API until a stop signal arrives.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use deshidwell::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = ServerConfig::from_settings(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;

    health_state.mark_unhealthy();
    info!("server stopped");
    result
}
