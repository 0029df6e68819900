//! Backend entry-point: loads settings, prepares storage and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tracking_backend::inbound::http::health::HealthState;
use tracking_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{BuildMode, ServerConfig, TrackingSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        TrackingSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = server_config(&settings).await?;
    info!(bind_addr = %config.bind_addr, "starting tracking backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .await
        .wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated")
}

async fn server_config(settings: &TrackingSettings) -> Result<ServerConfig> {
    let secret = settings.jwt_secret(BuildMode::from_debug_assertions())?;
    let config = ServerConfig::new(settings.bind_addr()?, secret)
        .with_token_ttl(settings.token_ttl()?)
        .with_fixture_users(settings.seed_fixture_users());

    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(config);
    };
    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}
