//! Cache key for shipment list pages.
use sha2::{Digest, Sha256};

use crate::domain::{CompiledFilter, ShipmentPageRequest};

/// Namespace prefix shared by every shipment page key. Bump the version when
/// the cached representation changes.
pub const SHIPMENT_PAGE_KEY_PREFIX: &str = "shipments:v1:";

/// Fingerprint of a filter signature plus page request.
///
/// Equal queries produce equal keys; the SHA-256 digest keeps keys short and
/// free of caller-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShipmentPageKey(String);

impl ShipmentPageKey {
    /// Derive the key for a compiled filter and page request.
    ///
    /// # Examples
    /// ```
    /// use tracking_backend::domain::ports::ShipmentPageKey;
    /// use tracking_backend::domain::{CompiledFilter, ShipmentListParams};
    ///
    /// let request = ShipmentListParams::default().resolve().expect("defaults");
    /// let key = ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request);
    /// assert!(key.as_str().starts_with("shipments:v1:"));
    /// ```
    pub fn for_query(filter: &CompiledFilter, request: &ShipmentPageRequest) -> Self {
        let canonical = format!(
            "{}|page={}|size={}|sort={}:{}",
            filter.signature(),
            request.page(),
            request.size(),
            request.sort().key(),
            request.sort().direction()
        );
        let digest = Sha256::digest(canonical.as_bytes());
        Self(format!("{SHIPMENT_PAGE_KEY_PREFIX}{}", hex::encode(digest)))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ShipmentPageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ShipmentPageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Key stability and separation.
    use super::*;
    use crate::domain::{ShipmentFilter, ShipmentListParams, ShipmentStatus};
    use rstest::rstest;

    fn request(page: i64, sort_by: Option<&str>) -> ShipmentPageRequest {
        ShipmentListParams {
            page: Some(page),
            sort_by: sort_by.map(str::to_owned),
            ..ShipmentListParams::default()
        }
        .resolve()
        .expect("valid params")
    }

    #[rstest]
    fn equal_queries_share_a_key() {
        let a = ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request(0, None));
        let b = ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request(0, None));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), SHIPMENT_PAGE_KEY_PREFIX.len() + 64);
    }

    #[rstest]
    fn page_sort_and_filter_change_the_key() {
        let base = ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request(0, None));
        let next_page = ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request(1, None));
        let sorted =
            ShipmentPageKey::for_query(&CompiledFilter::Unfiltered, &request(0, Some("weight")));
        let filter = ShipmentFilter {
            status: Some(ShipmentStatus::Delayed),
            ..ShipmentFilter::default()
        };
        let filtered =
            ShipmentPageKey::for_query(&CompiledFilter::compile(Some(&filter)), &request(0, None));

        assert_ne!(base, next_page);
        assert_ne!(base, sorted);
        assert_ne!(base, filtered);
    }
}
