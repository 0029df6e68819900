//! Offset page requests derived from optional caller parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sort::SortOrder;

/// Page index used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 0;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors raised while turning [`PageParams`] into a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page index was below zero or does not fit in `u32`.
    #[error("page must be between 0 and {max}, got {value}", max = u32::MAX)]
    InvalidPage {
        /// Rejected page index.
        value: i64,
    },
    /// The page size was below one or does not fit in `u32`.
    #[error("size must be between 1 and {max}, got {value}", max = u32::MAX)]
    InvalidSize {
        /// Rejected page size.
        value: i64,
    },
}

/// Raw, optional paging parameters as they arrive from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    pub page: Option<i64>,
    /// Number of items per page.
    pub size: Option<i64>,
}

impl PageParams {
    /// Bundle optional page and size values.
    #[must_use]
    pub const fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self { page, size }
    }
}

/// A concrete slice request: page index, page size and ordering.
///
/// ## Invariants
/// - `size` is at least one, so offsets and page counts are always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest<K> {
    page: u32,
    size: u32,
    sort: SortOrder<K>,
}

impl<K> PageRequest<K> {
    /// Build a request from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::InvalidSize`] when `size` is zero.
    pub fn new(page: u32, size: u32, sort: SortOrder<K>) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::InvalidSize { value: 0 });
        }
        Ok(Self { page, size, sort })
    }

    /// Resolve optional caller parameters, applying [`DEFAULT_PAGE`] and
    /// [`DEFAULT_PAGE_SIZE`] where values are missing.
    ///
    /// No upper bound is placed on the page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when the page is negative or the size is
    /// below one.
    pub fn from_params(params: PageParams, sort: SortOrder<K>) -> Result<Self, PageRequestError> {
        let page = match params.page {
            None => DEFAULT_PAGE,
            Some(value) => {
                u32::try_from(value).map_err(|_| PageRequestError::InvalidPage { value })?
            }
        };
        let size = match params.size {
            None => DEFAULT_PAGE_SIZE,
            Some(value) => match u32::try_from(value) {
                Ok(size) if size > 0 => size,
                _ => return Err(PageRequestError::InvalidSize { value }),
            },
        };
        Self::new(page, size, sort)
    }

    /// Zero-based page index.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Requested ordering.
    pub const fn sort(&self) -> &SortOrder<K> {
        &self.sort
    }

    /// Number of items to skip before the page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Maximum number of items on the page.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    //! Default resolution and bounds checks for page requests.
    use super::*;
    use crate::SortDirection;
    use rstest::rstest;

    fn by_name() -> SortOrder<&'static str> {
        SortOrder::new("name", SortDirection::Ascending)
    }

    #[rstest]
    fn missing_params_use_defaults() {
        let request = PageRequest::from_params(PageParams::default(), by_name()).expect("defaults");
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);
    }

    #[rstest]
    #[case(Some(3), Some(25), 75)]
    #[case(Some(0), Some(1), 0)]
    #[case(None, Some(50), 0)]
    #[case(Some(2), None, 20)]
    fn offset_is_page_times_size(
        #[case] page: Option<i64>,
        #[case] size: Option<i64>,
        #[case] expected: u64,
    ) {
        let request =
            PageRequest::from_params(PageParams::new(page, size), by_name()).expect("valid");
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    fn large_sizes_are_accepted() {
        let request = PageRequest::from_params(PageParams::new(None, Some(1_000_000)), by_name())
            .expect("no upper bound");
        assert_eq!(request.size(), 1_000_000);
    }

    #[rstest]
    #[case(PageParams::new(Some(-1), None), PageRequestError::InvalidPage { value: -1 })]
    #[case(PageParams::new(None, Some(0)), PageRequestError::InvalidSize { value: 0 })]
    #[case(PageParams::new(None, Some(-5)), PageRequestError::InvalidSize { value: -5 })]
    #[case(
        PageParams::new(Some(i64::MAX), None),
        PageRequestError::InvalidPage { value: i64::MAX }
    )]
    fn rejects_out_of_range_params(#[case] params: PageParams, #[case] expected: PageRequestError) {
        let err = PageRequest::from_params(params, by_name()).expect_err("invalid params");
        assert_eq!(err, expected);
    }
}
