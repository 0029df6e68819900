//! Page envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

use crate::request::PageRequest;

/// One slice of a larger result set plus the counts needed to navigate it.
///
/// ## Invariants
/// - `total_pages` is `ceil(total_elements / page_size)`.
/// - `has_next` holds iff a later page exists; `has_previous` iff
///   `current_page > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    total_pages: u64,
    current_page: u32,
    page_size: u32,
    has_next: bool,
    has_previous: bool,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched slice and the total match count.
    pub fn new<K>(content: Vec<T>, total_elements: u64, request: &PageRequest<K>) -> Self {
        let page_size = request.size();
        let current_page = request.page();
        let total_pages = total_elements.div_ceil(u64::from(page_size));
        Self {
            content,
            total_elements,
            total_pages,
            current_page,
            page_size,
            has_next: u64::from(current_page) + 1 < total_pages,
            has_previous: current_page > 0,
        }
    }

    /// Items on this page.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, returning its items.
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Number of matching items across all pages.
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages at the current page size.
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Zero-based index of this page.
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Requested page size.
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether a later page exists.
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether an earlier page exists.
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// Transform every item while keeping the navigation counts.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
