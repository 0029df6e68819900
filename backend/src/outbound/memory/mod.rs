//! Process-local store adapters.
//!
//! Used when no database URL is configured and by the integration tests.
//! Scans evaluate [`CompiledFilter`] predicates directly and sort with
//! [`compare_shipments`], so results match the PostgreSQL adapter's ordering.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{
    ShipmentRepository, ShipmentRepositoryError, ShipmentSlice, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    CompiledFilter, Shipment, ShipmentId, ShipmentPageRequest, UserAccount, compare_shipments,
};

/// Shipment store backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryShipmentRepository {
    shipments: RwLock<HashMap<ShipmentId, Shipment>>,
}

impl InMemoryShipmentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shipments.
    pub fn len(&self) -> usize {
        self.shipments.read().len()
    }

    /// Whether the store holds no shipments.
    pub fn is_empty(&self) -> bool {
        self.shipments.read().is_empty()
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError> {
        let mut shipments = self.shipments.write();
        let taken = shipments.values().any(|existing| {
            existing.id() != shipment.id()
                && existing.shipment_number() == shipment.shipment_number()
        });
        if taken {
            return Err(ShipmentRepositoryError::duplicate_number(
                shipment.shipment_number(),
            ));
        }
        shipments.insert(shipment.id(), shipment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ShipmentId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        Ok(self.shipments.read().get(id).cloned())
    }

    async fn find_by_number(
        &self,
        shipment_number: &str,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        Ok(self
            .shipments
            .read()
            .values()
            .find(|shipment| shipment.shipment_number() == shipment_number)
            .cloned())
    }

    async fn scan(
        &self,
        filter: &CompiledFilter,
        request: &ShipmentPageRequest,
    ) -> Result<ShipmentSlice, ShipmentRepositoryError> {
        let mut matching: Vec<Shipment> = self
            .shipments
            .read()
            .values()
            .filter(|shipment| filter.matches(shipment))
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare_shipments(request.sort(), a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = matching.into_iter().skip(offset).take(limit).collect();
        Ok(ShipmentSlice { items, total })
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentRepositoryError> {
        Ok(self.shipments.write().remove(id).is_some())
    }
}

/// Account store keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Create a store holding `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.user().username().to_owned(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self.accounts.read().get(username).cloned())
    }
}
