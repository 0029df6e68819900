//! Driving port for shipment mutations.
//!
//! Every successful call clears the shipment page cache before returning.

use async_trait::async_trait;

use crate::domain::{Error, Shipment, ShipmentId, ShipmentInput};

/// Domain use-case port for creating and editing shipments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentCommand: Send + Sync {
    /// Validate and store a new shipment.
    async fn create(&self, input: ShipmentInput) -> Result<Shipment, Error>;

    /// Overwrite an existing shipment's editable fields.
    async fn update(&self, id: &ShipmentId, input: ShipmentInput) -> Result<Shipment, Error>;

    /// Remove a shipment. Returns `true` on success.
    async fn delete(&self, id: &ShipmentId) -> Result<bool, Error>;

    /// Set or clear the review flag.
    async fn flag(&self, id: &ShipmentId, flagged: bool) -> Result<Shipment, Error>;
}
