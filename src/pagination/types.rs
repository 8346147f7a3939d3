//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::{Error, Result};
use crate::types::QueryParams;
use serde::{Serialize, Serializer};
use std::ops::Range;
use tracing::debug;
use url::Url;

// ============================================================================
// Result Sets
// ============================================================================

/// An ordered sequence of items being paginated
///
/// Implementations must present the same order for the duration of one
/// pagination call. Ranges passed to [`ResultSet::fetch`] are always within
/// `0..len()`.
pub trait ResultSet {
    /// Item type
    type Item;

    /// Total number of items
    fn len(&self) -> usize;

    /// Check if there are no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in the given index range, in order
    fn fetch(&self, range: Range<usize>) -> Vec<Self::Item>;

    /// Single item at `index`
    fn item(&self, index: usize) -> Option<Self::Item> {
        self.fetch(index..index + 1).into_iter().next()
    }
}

impl<T: Clone> ResultSet for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn fetch(&self, range: Range<usize>) -> Vec<T> {
        self.get(range).map(<[T]>::to_vec).unwrap_or_default()
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

impl<T: Clone> ResultSet for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn fetch(&self, range: Range<usize>) -> Vec<T> {
        ResultSet::fetch(self.as_slice(), range)
    }

    fn item(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Client-supplied paging parameters
///
/// Holds the raw query parameters of a request. Strategies read only the
/// parameters they are configured for and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    params: QueryParams,
    base_url: Option<Url>,
}

impl PageRequest {
    /// Create an empty request (first page, default size)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request from key/value pairs
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            base_url: None,
        }
    }

    /// Create a request from a URL-encoded query string (`page=2&page_size=5`)
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_params(url::form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Create a request from a full URL; links are rendered against it
    pub fn from_url(url: &str) -> Result<Self> {
        let mut url = Url::parse(url)?;
        let request = Self::from_params(url.query_pairs().into_owned());
        url.set_query(None);
        Ok(request.with_base_url(url))
    }

    /// Add or replace a parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Render navigation links as absolute URLs based on `url`
    #[must_use]
    pub fn with_base_url(mut self, mut url: Url) -> Self {
        url.set_query(None);
        url.set_fragment(None);
        self.base_url = Some(url);
        self
    }

    /// Get a parameter value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All parameters
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Base URL for links, if any
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Link to the same resource with `updates` applied to the parameters
    pub fn link<K, V>(&self, updates: impl IntoIterator<Item = (K, V)>) -> PageLink
    where
        K: Into<String>,
        V: ToString,
    {
        let mut params = self.params.clone();
        for (key, value) in updates {
            params.insert(key.into(), value.to_string());
        }

        let url = self.base_url.as_ref().map(|base| {
            let mut url = base.clone();
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params.iter());
            }
            url
        });

        PageLink { params, url }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Navigation descriptor for another page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Complete query parameters of the target page
    pub params: QueryParams,
    /// Absolute URL of the target page (when the request had a base URL)
    pub url: Option<Url>,
}

impl PageLink {
    /// Get a parameter of the target page
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The absolute URL, or a relative `?query` reference
    pub fn href(&self) -> String {
        match &self.url {
            Some(url) => url.to_string(),
            None => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.params.iter())
                    .finish();
                format!("?{query}")
            }
        }
    }
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.href())
    }
}

/// Position details for page-number results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-indexed page number
    pub number: usize,
    /// Number of pages at this page size
    pub num_pages: usize,
    /// Page size used
    pub page_size: usize,
}

/// One page of items plus continuation metadata
///
/// Serializes to `{"count", "next", "previous", "results"}`; `count` is
/// omitted when the strategy does not report totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Total number of items (not reported by cursor pagination)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Link to the following page
    pub next: Option<PageLink>,
    /// Link to the preceding page
    pub previous: Option<PageLink>,
    /// Items on this page
    #[serde(rename = "results")]
    pub items: Vec<T>,
    /// Effective page size
    #[serde(skip)]
    pub page_size: usize,
    /// Page-number details
    #[serde(skip)]
    pub page: Option<PageInfo>,
}

impl<T> PageResult<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if a following page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Check if a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Transform the items, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            count: self.count,
            next: self.next,
            previous: self.previous,
            items: self.items.into_iter().map(f).collect(),
            page_size: self.page_size,
            page: self.page,
        }
    }
}

// ============================================================================
// Page Size
// ============================================================================

/// Default and maximum page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    /// Size used when the client does not ask for one
    pub default: usize,
    /// Ceiling for client-requested sizes
    pub max: usize,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            default: 10,
            max: 100,
        }
    }
}

impl PageSize {
    /// Create page size bounds
    pub fn new(default: usize, max: usize) -> Self {
        Self { default, max }
    }

    /// Check that both bounds are positive
    pub fn validate(&self) -> Result<()> {
        if self.default == 0 {
            return Err(Error::invalid_value(
                "default_page_size",
                "must be a positive integer",
            ));
        }
        if self.max == 0 {
            return Err(Error::invalid_value(
                "max_page_size",
                "must be a positive integer",
            ));
        }
        Ok(())
    }

    /// Effective page size for a request
    ///
    /// Absent → default. Non-numeric, zero or negative → `InvalidPageSize`.
    /// Larger than max → clamped to max. Zero bounds → `InvalidConfigValue`.
    pub fn resolve(&self, request: &PageRequest, param: &str) -> Result<usize> {
        self.validate()?;

        let Some(raw) = request.param(param) else {
            return Ok(self.default.min(self.max));
        };

        let requested: i64 = raw.trim().parse().map_err(|_| {
            Error::invalid_page_size(param, format!("'{raw}' is not a valid page size"))
        })?;

        if requested <= 0 {
            return Err(Error::invalid_page_size(
                param,
                "Page size must be a positive integer",
            ));
        }

        let requested = usize::try_from(requested).unwrap_or(usize::MAX);
        if requested > self.max {
            debug!(
                "Clamping requested page size {} to maximum {}",
                requested, self.max
            );
            return Ok(self.max);
        }

        Ok(requested)
    }
}

// ============================================================================
// Paginator
// ============================================================================

/// Core trait for pagination strategies
pub trait Paginator<T>: Send + Sync {
    /// Compute the page of `items` selected by `request`
    fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>>;
}
