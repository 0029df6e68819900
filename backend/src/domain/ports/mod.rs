//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod login_service;
mod password_verifier;
mod shipment_command;
mod shipment_page_cache;
mod shipment_query;
mod shipment_repository;
mod token_issuer;
mod user_profile_query;
mod user_repository;

pub use cache_key::{SHIPMENT_PAGE_KEY_PREFIX, ShipmentPageKey};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, LoginSession};
#[cfg(test)]
pub use password_verifier::MockPasswordVerifier;
pub use password_verifier::{PasswordVerifier, PasswordVerifierError};
#[cfg(test)]
pub use shipment_command::MockShipmentCommand;
pub use shipment_command::ShipmentCommand;
#[cfg(test)]
pub use shipment_page_cache::MockShipmentPageCache;
pub use shipment_page_cache::{
    CacheGeneration, CacheLookup, ShipmentPageCache, ShipmentPageCacheError,
};
#[cfg(test)]
pub use shipment_query::MockShipmentQuery;
pub use shipment_query::ShipmentQuery;
#[cfg(test)]
pub use shipment_repository::MockShipmentRepository;
pub use shipment_repository::{ShipmentRepository, ShipmentRepositoryError, ShipmentSlice};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenIssuer, TokenIssuerError};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
