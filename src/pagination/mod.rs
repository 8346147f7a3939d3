//! Pagination module
//!
//! Supports: Page Number, Limit/Offset, Cursor
//!
//! # Overview
//!
//! The pagination module maps client paging parameters onto an ordered
//! result set. Each strategy selects a slice of items, clamps the page size
//! to its configured maximum and describes how to reach the neighbouring
//! pages. Computation is synchronous and side-effect free.

mod controls;
mod policy;
mod strategies;
mod types;

pub use controls::{displayed_page_numbers, page_controls, PageControl};
pub use policy::{sort_by_ordering_key, PaginationPolicy};
pub use strategies::{CursorPaginator, KeyFn, LimitOffsetPaginator, PageNumberPaginator};
pub use types::{PageInfo, PageLink, PageRequest, PageResult, PageSize, Paginator, ResultSet};
