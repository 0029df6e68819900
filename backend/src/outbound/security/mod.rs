//! Credential adapters: bearer token signing and password hashing.

mod fixture_accounts;
mod jwt_token_issuer;
mod password_hasher;

pub use fixture_accounts::{FIXTURE_PASSWORD, fixture_accounts};
pub use jwt_token_issuer::JwtTokenIssuer;
pub use password_hasher::{Argon2PasswordHasher, PasswordHashingError};
