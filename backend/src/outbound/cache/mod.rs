//! In-process shipment page cache.
//!
//! Pages live in a map guarded by one [`RwLock`] together with a generation
//! counter. [`ShipmentPageCache::invalidate_all`] clears the map and bumps the
//! generation under the write lock, so a page computed from a read that raced
//! with a mutation carries a stale ticket and is refused by `store`.

use std::collections::HashMap;

use async_trait::async_trait;
use pagination::Page;
use parking_lot::RwLock;

use crate::domain::Shipment;
use crate::domain::ports::{
    CacheGeneration, CacheLookup, ShipmentPageCache, ShipmentPageCacheError, ShipmentPageKey,
};

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    pages: HashMap<ShipmentPageKey, Page<Shipment>>,
}

/// Process-local [`ShipmentPageCache`].
#[derive(Debug, Default)]
pub struct InMemoryShipmentPageCache {
    state: RwLock<CacheState>,
}

impl InMemoryShipmentPageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.state.read().pages.len()
    }

    /// Whether no page is cached.
    pub fn is_empty(&self) -> bool {
        self.state.read().pages.is_empty()
    }
}

#[async_trait]
impl ShipmentPageCache for InMemoryShipmentPageCache {
    async fn lookup(&self, key: &ShipmentPageKey) -> Result<CacheLookup, ShipmentPageCacheError> {
        let state = self.state.read();
        Ok(match state.pages.get(key) {
            Some(page) => CacheLookup::Hit(page.clone()),
            None => CacheLookup::Miss(CacheGeneration::new(state.generation)),
        })
    }

    async fn store(
        &self,
        key: &ShipmentPageKey,
        page: Page<Shipment>,
        ticket: CacheGeneration,
    ) -> Result<bool, ShipmentPageCacheError> {
        let mut state = self.state.write();
        if ticket.value() != state.generation {
            return Ok(false);
        }
        state.pages.insert(key.clone(), page);
        Ok(true)
    }

    async fn invalidate_all(&self) -> Result<(), ShipmentPageCacheError> {
        let mut state = self.state.write();
        state.pages.clear();
        state.generation = state.generation.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompiledFilter, ShipmentListParams, ShipmentPageRequest};
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> ShipmentPageRequest {
        ShipmentListParams::default().resolve().expect("defaults")
    }

    fn key(request: &ShipmentPageRequest) -> ShipmentPageKey {
        ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, request)
    }

    fn miss_ticket(lookup: CacheLookup) -> CacheGeneration {
        match lookup {
            CacheLookup::Miss(ticket) => ticket,
            CacheLookup::Hit(_) => panic!("expected a miss"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn stores_and_serves_pages(request: ShipmentPageRequest) {
        let cache = InMemoryShipmentPageCache::new();
        let key = key(&request);
        let ticket = miss_ticket(cache.lookup(&key).await.expect("lookup"));
        let page = Page::new(Vec::new(), 0, &request);

        assert!(cache.store(&key, page.clone(), ticket).await.expect("store"));
        assert_eq!(
            cache.lookup(&key).await.expect("lookup"),
            CacheLookup::Hit(page)
        );
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn invalidation_clears_everything(request: ShipmentPageRequest) {
        let cache = InMemoryShipmentPageCache::new();
        let key = key(&request);
        let ticket = miss_ticket(cache.lookup(&key).await.expect("lookup"));
        cache
            .store(&key, Page::new(Vec::new(), 0, &request), ticket)
            .await
            .expect("store");

        cache.invalidate_all().await.expect("invalidate");

        assert!(cache.is_empty());
        let fresh = miss_ticket(cache.lookup(&key).await.expect("lookup"));
        assert!(fresh > ticket);
    }

    #[rstest]
    #[tokio::test]
    async fn refuses_pages_computed_before_an_invalidation(request: ShipmentPageRequest) {
        let cache = InMemoryShipmentPageCache::new();
        let key = key(&request);
        let stale = miss_ticket(cache.lookup(&key).await.expect("lookup"));

        cache.invalidate_all().await.expect("invalidate");
        let stored = cache
            .store(&key, Page::new(Vec::new(), 0, &request), stale)
            .await
            .expect("store");

        assert!(!stored);
        assert!(cache.is_empty());
    }
}
