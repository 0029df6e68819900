//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, ShipmentCommand, ShipmentQuery, TokenIssuer, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub shipments: Arc<dyn ShipmentQuery>,
    pub shipment_commands: Arc<dyn ShipmentCommand>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    /// Verifies bearer tokens for the [`Caller`](super::identity::Caller)
    /// extractor.
    pub tokens: Arc<dyn TokenIssuer>,
}
