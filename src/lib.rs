// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Pager
//!
//! Pagination policies for ordered result sets.
//!
//! ## Features
//!
//! - **Page Number**: `?page=2&page_size=20`, with `?page=last` and navigation controls
//! - **Limit/Offset**: `?limit=20&offset=40`
//! - **Cursor**: opaque `?cursor=...` tokens that survive inserts and deletes
//! - **Signed Cursors**: optional HS256 tamper detection
//! - **YAML Settings**: declarative size bounds and parameter names
//!
//! ## Quick Start
//!
//! ```rust
//! use solidafy_pager::config::PaginationSettings;
//! use solidafy_pager::cursor::OrderingKey;
//! use solidafy_pager::pagination::{PageRequest, PaginationPolicy};
//! use solidafy_pager::types::StrategyKind;
//!
//! let items: Vec<i64> = (1..=12).collect();
//! let settings = PaginationSettings::new(StrategyKind::PageNumber).with_page_sizes(5, 100);
//! let policy = PaginationPolicy::from_settings(&settings, |n: &i64| OrderingKey::Int(*n))?;
//!
//! let page = policy.paginate(&items, &PageRequest::from_query("page=2"))?;
//! assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
//! assert_eq!(page.count, Some(12));
//! # Ok::<(), solidafy_pager::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PaginationPolicy                           │
//! │      paginate(ResultSet, PageRequest) → PageResult              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────┬────────────┴──────────┬───────────────────────┐
//! │   Page Number   │     Limit/Offset      │        Cursor         │
//! ├─────────────────┼───────────────────────┼───────────────────────┤
//! │ page, page_size │ limit, offset         │ cursor, limit         │
//! │ page=last       │ empty past the end    │ OrderingKey position  │
//! │ controls        │                       │ Base64 / HS256 codec  │
//! └─────────────────┴───────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pagination settings and loaders
pub mod config;

/// Cursor positions and token codecs
pub mod cursor;

/// Pagination strategies
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_settings, load_settings_from_str, PaginationSettings};
pub use cursor::{Cursor, OrderingKey};
pub use pagination::{PageRequest, PageResult, PaginationPolicy, Paginator, ResultSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
