//! Shipment query and mutation service.
//!
//! Implements the [`ShipmentQuery`] and [`ShipmentCommand`] driving ports over
//! a [`ShipmentRepository`] and a [`ShipmentPageCache`]. Reads go through the
//! cache; every successful mutation clears it wholesale.
//!
//! Cache failures on the read path are logged and the store is read directly.
//! A failure to clear the cache after a write is reported as an internal
//! error, since the cache may then serve pages that predate the write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CacheLookup, ShipmentCommand, ShipmentPageCache, ShipmentPageKey, ShipmentQuery,
    ShipmentRepository, ShipmentRepositoryError,
};
use crate::domain::{
    CompiledFilter, Error, Shipment, ShipmentFilter, ShipmentId, ShipmentInput,
    ShipmentListParams, ShipmentValidationError,
};

fn map_repository_error(error: ShipmentRepositoryError) -> Error {
    match error {
        ShipmentRepositoryError::Connection { message } => {
            Error::internal(format!("shipment repository unavailable: {message}"))
        }
        ShipmentRepositoryError::Query { message } => {
            Error::internal(format!("shipment repository error: {message}"))
        }
        ShipmentRepositoryError::DuplicateNumber { shipment_number } => {
            duplicate_number(&shipment_number)
        }
    }
}

fn map_validation_error(error: ShipmentValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": error.code() }))
}

fn duplicate_number(shipment_number: &str) -> Error {
    Error::invalid_request(format!("shipment number already in use: {shipment_number}"))
        .with_details(json!({
            "field": "shipmentNumber",
            "code": "duplicate_shipment_number",
        }))
}

fn shipment_not_found(id: &ShipmentId) -> Error {
    Error::not_found(format!("shipment not found with id: {id}"))
}

/// Shipment service implementing the shipment driving ports.
#[derive(Clone)]
pub struct ShipmentService<R, C> {
    repo: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> ShipmentService<R, C> {
    /// Create a service over a store, a page cache and a clock.
    pub fn new(repo: Arc<R>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, cache, clock }
    }
}

impl<R, C> ShipmentService<R, C>
where
    R: ShipmentRepository,
    C: ShipmentPageCache,
{
    async fn find_existing(&self, id: &ShipmentId) -> Result<Shipment, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| shipment_not_found(id))
    }

    /// Reject `shipment_number` when a shipment other than `owner` holds it.
    async fn ensure_number_available(
        &self,
        shipment_number: &str,
        owner: Option<ShipmentId>,
    ) -> Result<(), Error> {
        let holder = self
            .repo
            .find_by_number(shipment_number)
            .await
            .map_err(map_repository_error)?;
        match holder {
            Some(existing) if Some(existing.id()) != owner => {
                Err(duplicate_number(shipment_number))
            }
            _ => Ok(()),
        }
    }

    async fn invalidate(&self) -> Result<(), Error> {
        self.cache.invalidate_all().await.map_err(|error| {
            Error::internal(format!("shipment cache invalidation failed: {error}"))
        })
    }

    async fn persist(&self, shipment: &Shipment) -> Result<(), Error> {
        self.repo
            .save(shipment)
            .await
            .map_err(map_repository_error)?;
        self.invalidate().await
    }
}

#[async_trait]
impl<R, C> ShipmentQuery for ShipmentService<R, C>
where
    R: ShipmentRepository,
    C: ShipmentPageCache,
{
    async fn list(
        &self,
        filter: Option<ShipmentFilter>,
        params: ShipmentListParams,
    ) -> Result<Page<Shipment>, Error> {
        info!(?filter, ?params, "fetching shipments");
        let request = params.resolve()?;
        let compiled = CompiledFilter::compile(filter.as_ref());
        let key = ShipmentPageKey::for_query(&compiled, &request);

        let ticket = match self.cache.lookup(&key).await {
            Ok(CacheLookup::Hit(page)) => {
                debug!(%key, "shipment page cache hit");
                return Ok(page);
            }
            Ok(CacheLookup::Miss(ticket)) => {
                debug!(%key, "shipment page cache miss");
                Some(ticket)
            }
            Err(error) => {
                warn!(%key, %error, "shipment page cache lookup failed; reading store");
                None
            }
        };

        let slice = self
            .repo
            .scan(&compiled, &request)
            .await
            .map_err(map_repository_error)?;
        let page = Page::new(slice.items, slice.total, &request);

        if let Some(ticket) = ticket {
            match self.cache.store(&key, page.clone(), ticket).await {
                Ok(true) => {}
                Ok(false) => debug!(%key, "discarded page computed before an invalidation"),
                Err(error) => warn!(%key, %error, "failed to cache shipment page"),
            }
        }
        Ok(page)
    }

    async fn get(&self, id: &ShipmentId) -> Result<Shipment, Error> {
        info!(%id, "fetching shipment by id");
        self.find_existing(id).await
    }
}

#[async_trait]
impl<R, C> ShipmentCommand for ShipmentService<R, C>
where
    R: ShipmentRepository,
    C: ShipmentPageCache,
{
    async fn create(&self, input: ShipmentInput) -> Result<Shipment, Error> {
        info!(shipment_number = %input.shipment_number, "creating shipment");
        input.validate().map_err(map_validation_error)?;
        self.ensure_number_available(&input.shipment_number, None)
            .await?;

        let shipment = Shipment::create(ShipmentId::random(), input, self.clock.utc());
        self.persist(&shipment).await?;
        Ok(shipment)
    }

    async fn update(&self, id: &ShipmentId, input: ShipmentInput) -> Result<Shipment, Error> {
        info!(%id, "updating shipment");
        input.validate().map_err(map_validation_error)?;
        let mut shipment = self.find_existing(id).await?;
        if shipment.shipment_number() != input.shipment_number {
            self.ensure_number_available(&input.shipment_number, Some(*id))
                .await?;
        }

        shipment.apply_update(input, self.clock.utc());
        self.persist(&shipment).await?;
        Ok(shipment)
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, Error> {
        info!(%id, "deleting shipment");
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(shipment_not_found(id));
        }
        self.invalidate().await?;
        Ok(true)
    }

    async fn flag(&self, id: &ShipmentId, flagged: bool) -> Result<Shipment, Error> {
        info!(%id, flagged, "flagging shipment");
        let mut shipment = self.find_existing(id).await?;
        shipment.set_flagged(flagged, self.clock.utc());
        self.persist(&shipment).await?;
        Ok(shipment)
    }
}

#[cfg(test)]
#[path = "shipment_service_tests.rs"]
mod tests;
