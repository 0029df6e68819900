//! Runtime settings and the HTTP server configuration object.
//!
//! [`TrackingSettings`] is loaded through `OrthoConfig`, so every field can
//! come from the command line, a configuration file, or a `TRACKING_*`
//! environment variable. Accessors apply defaults and validate values before
//! [`ServerConfig`] is assembled.

use std::fmt;
use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use tracking_backend::outbound::persistence::DbPool;
use uuid::Uuid;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const JWT_SECRET_MIN_LEN: usize = 32;

/// Build mode for settings validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to an ephemeral signing secret.
    Debug,
    /// Release builds require an explicit signing secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while validating [`TrackingSettings`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The token lifetime is zero or too large to represent.
    #[error("invalid token lifetime of {value} seconds")]
    InvalidTokenTtl { value: u64 },
    /// No signing secret was configured for a release build.
    #[error("TRACKING_JWT_SECRET must be set in release builds")]
    MissingJwtSecret,
    /// The configured signing secret is shorter than the minimum.
    #[error("token signing secret must be at least {min_len} bytes, got {length}")]
    JwtSecretTooShort { length: usize, min_len: usize },
}

/// Service settings.
///
/// Values resolve from CLI arguments, configuration files and environment
/// variables prefixed with `TRACKING_`.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKING")]
pub struct TrackingSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the service runs on
    /// process-local stores.
    pub database_url: Option<String>,
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in seconds. Defaults to 24 hours.
    pub token_ttl_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Insert the admin and employee fixture accounts at startup. Unset
    /// means seed only when no database is configured.
    ///
    /// Read from files and the environment only: a CLI switch would always
    /// resolve to `Some(false)` and hide the database-dependent default.
    #[ortho_config(skip_cli)]
    pub seed_fixture_users: Option<bool>,
}

impl fmt::Debug for TrackingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("seed_fixture_users", &self.seed_fixture_users)
            .finish()
    }
}

impl TrackingSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Access token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidTokenTtl`] for zero or unrepresentable
    /// lifetimes.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let value = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        i64::try_from(value)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
            .ok_or(SettingsError::InvalidTokenTtl { value })
    }

    /// Maximum pooled connections, never below one.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Whether fixture accounts should be inserted at startup.
    ///
    /// Defaults to seeding only when no database is configured.
    #[must_use]
    pub fn seed_fixture_users(&self) -> bool {
        self.seed_fixture_users
            .unwrap_or(self.database_url.is_none())
    }

    /// Token signing secret.
    ///
    /// Debug builds generate a random secret when none is configured, so
    /// tokens stop verifying after a restart.
    ///
    /// # Errors
    ///
    /// Release builds return [`SettingsError::MissingJwtSecret`] when no
    /// secret is set and [`SettingsError::JwtSecretTooShort`] when it is
    /// shorter than 32 bytes.
    pub fn jwt_secret(&self, mode: BuildMode) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().filter(|secret| !secret.is_empty()) {
            Some(secret) => {
                let length = secret.len();
                if mode == BuildMode::Release && length < JWT_SECRET_MIN_LEN {
                    return Err(SettingsError::JwtSecretTooShort {
                        length,
                        min_len: JWT_SECRET_MIN_LEN,
                    });
                }
                Ok(Zeroizing::new(secret.as_bytes().to_vec()))
            }
            None if mode == BuildMode::Debug => {
                warn!("TRACKING_JWT_SECRET not set; using temporary signing secret (dev only)");
                Ok(ephemeral_secret())
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(Vec::with_capacity(JWT_SECRET_MIN_LEN));
    secret.extend_from_slice(Uuid::new_v4().as_bytes());
    secret.extend_from_slice(Uuid::new_v4().as_bytes());
    secret
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: TimeDelta,
    pub(crate) seed_fixture_users: bool,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with the default token lifetime and
    /// no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl: TimeDelta::seconds(86_400),
            seed_fixture_users: true,
            db_pool: None,
        }
    }

    /// Override the access token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: TimeDelta) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Choose whether fixture accounts are inserted at startup.
    #[must_use]
    pub fn with_fixture_users(mut self, seed: bool) -> Self {
        self.seed_fixture_users = seed;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, shipments and accounts are stored in PostgreSQL
    /// instead of process-local maps.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by unit tests; retained for fixture access")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
