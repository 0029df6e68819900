//! Builders for HTTP state over PostgreSQL or process-local stores.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use tracking_backend::domain::ports::{ShipmentRepository, UserRepository};
use tracking_backend::domain::{AuthService, ShipmentService, UserAccount};
use tracking_backend::inbound::http::state::HttpState;
use tracking_backend::outbound::cache::InMemoryShipmentPageCache;
use tracking_backend::outbound::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use tracking_backend::outbound::persistence::{
    DbPool, DieselShipmentRepository, DieselUserRepository,
};
use tracking_backend::outbound::security::{
    Argon2PasswordHasher, JwtTokenIssuer, fixture_accounts,
};

use super::ServerConfig;

fn fixture_users(
    hasher: &Argon2PasswordHasher,
    seed: bool,
) -> std::io::Result<Vec<UserAccount>> {
    if !seed {
        return Ok(Vec::new());
    }
    fixture_accounts(hasher).map_err(|err| std::io::Error::other(err.to_string()))
}

/// Wire the shipment and auth services over the given stores.
fn assemble<S, U>(
    shipments: Arc<S>,
    users: Arc<U>,
    hasher: Argon2PasswordHasher,
    config: &ServerConfig,
) -> HttpState
where
    S: ShipmentRepository + 'static,
    U: UserRepository + 'static,
{
    let clock = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenIssuer::new(&config.token_secret));
    let shipment_service = Arc::new(ShipmentService::new(
        shipments,
        Arc::new(InMemoryShipmentPageCache::new()),
        clock.clone(),
    ));
    let auth_service = Arc::new(
        AuthService::new(users, Arc::new(hasher), tokens.clone(), clock)
            .with_token_ttl(config.token_ttl),
    );

    HttpState {
        shipments: shipment_service.clone(),
        shipment_commands: shipment_service,
        login: auth_service.clone(),
        profile: auth_service,
        tokens,
    }
}

async fn build_database_state(pool: &DbPool, config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Argon2PasswordHasher::new();
    let users = DieselUserRepository::new(pool.clone());
    let accounts = fixture_users(&hasher, config.seed_fixture_users)?;
    if !accounts.is_empty() {
        let inserted = users
            .seed(&accounts)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        info!(inserted, "seeded fixture accounts");
    }
    Ok(assemble(
        Arc::new(DieselShipmentRepository::new(pool.clone())),
        Arc::new(users),
        hasher,
        config,
    ))
}

fn build_in_memory_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Argon2PasswordHasher::new();
    let accounts = fixture_users(&hasher, config.seed_fixture_users)?;
    info!(
        accounts = accounts.len(),
        "no database configured; using process-local stores"
    );
    Ok(assemble(
        Arc::new(InMemoryShipmentRepository::new()),
        Arc::new(InMemoryUserRepository::with_accounts(accounts)),
        hasher,
        config,
    ))
}

/// Build handler state, using PostgreSQL adapters when a pool is configured.
///
/// # Errors
///
/// Returns an I/O error when fixture accounts cannot be hashed or seeded.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => build_database_state(pool, config).await,
        None => build_in_memory_state(config),
    }
}
