//! Driving port for the current user's profile.

use async_trait::async_trait;

use crate::domain::{Error, Principal, User};

/// Domain use-case port for reading the authenticated caller's account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the account named by `principal`, or `not_found` when it no
    /// longer exists.
    async fn me(&self, principal: &Principal) -> Result<User, Error>;
}
