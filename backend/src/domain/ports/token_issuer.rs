//! Port for signing and verifying bearer tokens.

use crate::domain::{AccessClaims, AccessToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenIssuerError {
        /// The claims could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, forged or expired.
        Rejected { message: String } => "token rejected: {message}",
    }
}

/// Signs claims into opaque tokens and verifies them on the way back in.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign `claims` into a bearer token.
    fn issue(&self, claims: &AccessClaims) -> Result<AccessToken, TokenIssuerError>;

    /// Verify a token's signature and expiry and return its claims.
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenIssuerError>;
}
