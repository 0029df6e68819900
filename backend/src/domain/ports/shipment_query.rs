//! Driving port for shipment reads.
//!
//! Inbound adapters call this port after the access gate has admitted the
//! caller; it carries no identity.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Shipment, ShipmentFilter, ShipmentId, ShipmentListParams};

/// Domain use-case port for listing and fetching shipments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentQuery: Send + Sync {
    /// One filtered, sorted page of shipments.
    async fn list(
        &self,
        filter: Option<ShipmentFilter>,
        params: ShipmentListParams,
    ) -> Result<Page<Shipment>, Error>;

    /// A single shipment, or `not_found`.
    async fn get(&self, id: &ShipmentId) -> Result<Shipment, Error>;
}
