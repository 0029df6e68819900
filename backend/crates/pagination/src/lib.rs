//! Offset pagination primitives shared by backend list endpoints.
//!
//! The crate is deliberately free of domain knowledge: callers pick their own
//! sort key type and decide what the default ordering is. What lives here is
//! the arithmetic (offsets, page counts, next/previous flags) and the parsing
//! rules every list endpoint shares.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageParams, PageRequest, SortDirection, SortOrder};
//!
//! let params = PageParams::new(Some(1), Some(2));
//! let request = PageRequest::from_params(params, SortOrder::new("name", SortDirection::Ascending))
//!     .expect("valid params");
//! assert_eq!(request.offset(), 2);
//!
//! let page = Page::new(vec!["c", "d"], 5, &request);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_next());
//! assert!(page.has_previous());
//! ```

mod page;
mod request;
mod sort;

pub use page::Page;
pub use request::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageParams, PageRequest, PageRequestError};
pub use sort::{SortDirection, SortOrder};
