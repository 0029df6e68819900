//! Port interface for caching shipment list pages.
//!
//! The cache is cleared wholesale after every successful mutation. To stop a
//! slow reader from repopulating it with a page computed before such a clear,
//! a miss hands out a [`CacheGeneration`] ticket and [`ShipmentPageCache::store`]
//! refuses pages whose ticket predates the latest invalidation.
use async_trait::async_trait;
use pagination::Page;

use crate::domain::Shipment;

use super::{ShipmentPageKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum ShipmentPageCacheError {
        /// Cache backend is unavailable.
        Backend { message: String } => "shipment page cache backend failure: {message}",
    }
}

/// Invalidation epoch observed at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheGeneration(u64);

impl CacheGeneration {
    /// Wrap a raw epoch counter.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw epoch counter.
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A page stored since the last invalidation.
    Hit(Page<Shipment>),
    /// Nothing cached; populate with this ticket.
    Miss(CacheGeneration),
}

/// Shared store of list pages keyed by [`ShipmentPageKey`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentPageCache: Send + Sync {
    /// Read a cached page.
    async fn lookup(&self, key: &ShipmentPageKey) -> Result<CacheLookup, ShipmentPageCacheError>;

    /// Store a page computed after the lookup that issued `ticket`.
    ///
    /// Returns `false` when an invalidation happened in between and the page
    /// was discarded.
    async fn store(
        &self,
        key: &ShipmentPageKey,
        page: Page<Shipment>,
        ticket: CacheGeneration,
    ) -> Result<bool, ShipmentPageCacheError>;

    /// Drop every cached page.
    async fn invalidate_all(&self) -> Result<(), ShipmentPageCacheError>;
}

