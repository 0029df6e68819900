//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing user store or token
//! format.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Error, LoginCredentials, User};

/// A successful login: the signed token and the account it identifies.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSession {
    /// Bearer token for subsequent requests.
    pub token: AccessToken,
    /// Token expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Authenticated user, without credentials.
    pub user: User,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}
