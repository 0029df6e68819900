//! Port for shipment persistence.

use async_trait::async_trait;

use crate::domain::{CompiledFilter, Shipment, ShipmentId, ShipmentPageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shipment repository adapters.
    pub enum ShipmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shipment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "shipment repository query failed: {message}",
        /// Another shipment already carries this shipment number.
        DuplicateNumber { shipment_number: String } =>
            "shipment number already in use: {shipment_number}",
    }
}

/// One page of a scan plus the size of the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentSlice {
    /// Records on the requested page, in request order.
    pub items: Vec<Shipment>,
    /// Number of records matching the filter across all pages.
    pub total: u64,
}

/// Port for reading and writing shipment records.
///
/// Each mutation is a single atomic statement. Adapters never interpret
/// filters as query text: [`CompiledFilter`] clauses are evaluated directly or
/// bound as parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Insert a new shipment or replace the stored one with the same id.
    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError>;

    /// Fetch a shipment by id.
    async fn find_by_id(
        &self,
        id: &ShipmentId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError>;

    /// Fetch a shipment by its unique shipment number.
    async fn find_by_number(
        &self,
        shipment_number: &str,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError>;

    /// Read one sorted page of the shipments selected by `filter`.
    ///
    /// Ordering follows the request's sort, with ties broken by id ascending.
    async fn scan(
        &self,
        filter: &CompiledFilter,
        request: &ShipmentPageRequest,
    ) -> Result<ShipmentSlice, ShipmentRepositoryError>;

    /// Remove a shipment. Returns whether a record was deleted.
    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentRepositoryError>;
}
