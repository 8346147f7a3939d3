//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::controls::{page_controls, PageControl};
use super::types::{
    PageInfo, PageLink, PageRequest, PageResult, PageSize, Paginator, ResultSet,
};
use crate::config::PaginationSettings;
use crate::cursor::{codec_from_settings, Base64CursorCodec, Cursor, CursorCodec, OrderingKey};
use crate::error::{Error, Result};
use crate::types::{OrderDirection, OutOfRange};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., traditional web pagination)
///
/// Uses a 1-indexed page number parameter to paginate.
/// Common patterns:
/// - `?page=2`
/// - `?page=2&page_size=50`
/// - `?page=last`
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Page size bounds
    pub page_size: PageSize,
    /// Page values that select the final page
    pub last_page_strings: Vec<String>,
    /// Whether page 1 of an empty result set is valid
    pub allow_empty_first_page: bool,
    /// Behaviour for pages past the last one
    pub out_of_range: OutOfRange,
}

impl Default for PageNumberPaginator {
    fn default() -> Self {
        Self::new("page", "page_size", PageSize::default())
    }
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(
        page_param: impl Into<String>,
        page_size_param: impl Into<String>,
        page_size: PageSize,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            page_size_param: page_size_param.into(),
            page_size,
            last_page_strings: vec!["last".to_string()],
            allow_empty_first_page: true,
            out_of_range: OutOfRange::Error,
        }
    }

    /// Create from settings
    pub fn from_settings(settings: &PaginationSettings) -> Self {
        Self {
            page_param: settings.page_param.clone(),
            page_size_param: settings.page_size_param.clone(),
            page_size: PageSize::new(settings.default_page_size, settings.max_page_size),
            last_page_strings: settings.last_page_strings.clone(),
            allow_empty_first_page: settings.allow_empty_first_page,
            out_of_range: settings.out_of_range,
        }
    }

    /// Set out-of-range behaviour
    #[must_use]
    pub fn with_out_of_range(mut self, out_of_range: OutOfRange) -> Self {
        self.out_of_range = out_of_range;
        self
    }

    /// Set whether page 1 of an empty result set is valid
    #[must_use]
    pub fn with_allow_empty_first_page(mut self, allow: bool) -> Self {
        self.allow_empty_first_page = allow;
        self
    }

    /// Set the page values that select the final page
    #[must_use]
    pub fn with_last_page_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.last_page_strings = strings.into_iter().map(Into::into).collect();
        self
    }

    /// Navigation controls for a computed page
    pub fn controls(&self, info: &PageInfo, request: &PageRequest) -> Vec<PageControl> {
        page_controls(info, request, &self.page_param)
    }

    /// Parse the requested page number
    fn page_number(&self, request: &PageRequest, num_pages: usize) -> Result<usize> {
        let Some(raw) = request.param(&self.page_param) else {
            return Ok(1);
        };
        let raw = raw.trim();

        let number = if self.last_page_strings.iter().any(|s| s == raw) {
            i64::try_from(num_pages).unwrap_or(i64::MAX)
        } else {
            raw.parse::<i64>().map_err(|_| {
                Error::invalid_page(&self.page_param, format!("'{raw}' is not a valid page"))
            })?
        };

        if number < 1 {
            if num_pages == 0 {
                return Err(Error::invalid_page(
                    &self.page_param,
                    "That page contains no results",
                ));
            }
            return Err(Error::invalid_page(
                &self.page_param,
                "That page number is less than 1",
            ));
        }

        Ok(usize::try_from(number).unwrap_or(usize::MAX))
    }
}

impl<T> Paginator<T> for PageNumberPaginator {
    fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>> {
        let page_size = self.page_size.resolve(request, &self.page_size_param)?;
        let count = items.len();
        let num_pages = if count == 0 {
            usize::from(self.allow_empty_first_page)
        } else {
            count.div_ceil(page_size)
        };

        let number = self.page_number(request, num_pages)?;
        let info = PageInfo {
            number,
            num_pages,
            page_size,
        };

        if number > num_pages {
            if self.out_of_range == OutOfRange::Error {
                return Err(Error::invalid_page(
                    &self.page_param,
                    "That page contains no results",
                ));
            }

            debug!("Page {} is past the last page ({})", number, num_pages);
            return Ok(PageResult {
                count: Some(count),
                next: None,
                previous: (num_pages > 0)
                    .then(|| request.link([(self.page_param.as_str(), num_pages)])),
                items: Vec::new(),
                page_size,
                page: Some(info),
            });
        }

        let start = (number - 1) * page_size;
        let end = start.saturating_add(page_size).min(count);
        let page = if start < end {
            items.fetch(start..end)
        } else {
            Vec::new()
        };

        debug!(
            "Page {} of {} ({} of {} items)",
            number,
            num_pages,
            page.len(),
            count
        );

        Ok(PageResult {
            count: Some(count),
            next: (number < num_pages)
                .then(|| request.link([(self.page_param.as_str(), number + 1)])),
            previous: (number > 1).then(|| request.link([(self.page_param.as_str(), number - 1)])),
            items: page,
            page_size,
            page: Some(info),
        })
    }
}

// ============================================================================
// Limit/Offset Pagination
// ============================================================================

/// Limit/offset pagination (e.g., SQL-style pagination)
///
/// Uses offset and limit parameters to paginate.
/// Common patterns:
/// - `?offset=100&limit=50`
/// - `?skip=100&take=50`
#[derive(Debug, Clone)]
pub struct LimitOffsetPaginator {
    /// Query parameter name for limit
    pub limit_param: String,
    /// Query parameter name for offset
    pub offset_param: String,
    /// Limit bounds
    pub page_size: PageSize,
}

impl Default for LimitOffsetPaginator {
    fn default() -> Self {
        Self::new("limit", "offset", PageSize::default())
    }
}

impl LimitOffsetPaginator {
    /// Create a new limit/offset paginator
    pub fn new(
        limit_param: impl Into<String>,
        offset_param: impl Into<String>,
        page_size: PageSize,
    ) -> Self {
        Self {
            limit_param: limit_param.into(),
            offset_param: offset_param.into(),
            page_size,
        }
    }

    /// Create from settings
    pub fn from_settings(settings: &PaginationSettings) -> Self {
        Self::new(
            settings.limit_param.clone(),
            settings.offset_param.clone(),
            PageSize::new(settings.default_page_size, settings.max_page_size),
        )
    }

    /// Parse the requested offset
    fn offset(&self, request: &PageRequest) -> Result<usize> {
        let Some(raw) = request.param(&self.offset_param) else {
            return Ok(0);
        };

        let offset: i64 = raw.trim().parse().map_err(|_| {
            Error::invalid_offset(&self.offset_param, format!("'{raw}' is not a valid offset"))
        })?;

        if offset < 0 {
            return Err(Error::invalid_offset(
                &self.offset_param,
                "Offset cannot be negative",
            ));
        }

        Ok(usize::try_from(offset).unwrap_or(usize::MAX))
    }
}

impl<T> Paginator<T> for LimitOffsetPaginator {
    fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>> {
        let limit = self.page_size.resolve(request, &self.limit_param)?;
        let offset = self.offset(request)?;
        let count = items.len();

        let end = offset.saturating_add(limit).min(count);
        let page = if offset < end {
            items.fetch(offset..end)
        } else {
            Vec::new()
        };

        debug!(
            "Offset {} limit {} ({} of {} items)",
            offset,
            limit,
            page.len(),
            count
        );

        let link = |offset: usize| {
            request.link([
                (self.limit_param.as_str(), limit),
                (self.offset_param.as_str(), offset),
            ])
        };

        Ok(PageResult {
            count: Some(count),
            next: (offset.saturating_add(limit) < count).then(|| link(offset + limit)),
            previous: (offset > 0).then(|| link(offset.saturating_sub(limit))),
            items: page,
            page_size: limit,
            page: None,
        })
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Accessor returning the ordering key of an item
pub type KeyFn<T> = Arc<dyn Fn(&T) -> OrderingKey + Send + Sync>;

/// Cursor-based pagination
///
/// Walks the result set by ordering key rather than by index, so a cursor
/// stays valid when items are inserted or removed outside the current page.
/// The result set must be sorted by the key in the configured direction,
/// and keys must be unique. Totals are never reported.
/// Common patterns:
/// - `?cursor=eyJwIjp7ImludCI6NX19`
/// - `?cursor=...&limit=20`
#[derive(Clone)]
pub struct CursorPaginator<T> {
    /// Query parameter name for the cursor token
    pub cursor_param: String,
    /// Query parameter name for the page size
    pub limit_param: String,
    /// Page size bounds
    pub page_size: PageSize,
    /// Direction of the ordering key
    pub ordering: OrderDirection,
    key: KeyFn<T>,
    codec: Arc<dyn CursorCodec>,
}

impl<T> fmt::Debug for CursorPaginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorPaginator")
            .field("cursor_param", &self.cursor_param)
            .field("limit_param", &self.limit_param)
            .field("page_size", &self.page_size)
            .field("ordering", &self.ordering)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl<T> CursorPaginator<T> {
    /// Create a new cursor paginator ordered by `key`
    pub fn new<F>(key: F) -> Self
    where
        F: Fn(&T) -> OrderingKey + Send + Sync + 'static,
    {
        Self {
            cursor_param: "cursor".to_string(),
            limit_param: "limit".to_string(),
            page_size: PageSize::default(),
            ordering: OrderDirection::Asc,
            key: Arc::new(key),
            codec: Arc::new(Base64CursorCodec),
        }
    }

    /// Create from settings
    pub fn from_settings<F>(settings: &PaginationSettings, key: F) -> Self
    where
        F: Fn(&T) -> OrderingKey + Send + Sync + 'static,
    {
        Self {
            cursor_param: settings.cursor_param.clone(),
            limit_param: settings.limit_param.clone(),
            page_size: PageSize::new(settings.default_page_size, settings.max_page_size),
            ordering: settings.ordering,
            key: Arc::new(key),
            codec: codec_from_settings(settings),
        }
    }

    /// Set the query parameter names
    #[must_use]
    pub fn with_params(
        mut self,
        cursor_param: impl Into<String>,
        limit_param: impl Into<String>,
    ) -> Self {
        self.cursor_param = cursor_param.into();
        self.limit_param = limit_param.into();
        self
    }

    /// Set page size bounds
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the ordering direction
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderDirection) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the token codec
    #[must_use]
    pub fn with_codec(mut self, codec: impl CursorCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Ordering key of an item
    pub fn key_of(&self, item: &T) -> OrderingKey {
        (self.key)(item)
    }

    /// Encode a cursor with this paginator's codec
    pub fn encode_cursor(&self, cursor: &Cursor) -> Result<String> {
        self.codec.encode(cursor)
    }

    /// Decode a client token into a cursor
    pub fn decode_cursor(&self, token: &str) -> Result<Cursor> {
        self.codec.decode(token).map_err(|e| {
            warn!("Rejected cursor token: {}", e.detail());
            Error::invalid_cursor(&self.cursor_param, e.detail())
        })
    }

    /// Cursor from the request; absent or empty means the start
    fn request_cursor(&self, request: &PageRequest) -> Result<Cursor> {
        match request.param(&self.cursor_param) {
            None => Ok(Cursor::start()),
            Some(token) if token.trim().is_empty() => Ok(Cursor::start()),
            Some(token) => self.decode_cursor(token),
        }
    }

    /// Index of the first item for which `pred` is false
    ///
    /// `pred` must hold for a prefix of the result set.
    fn partition_point(
        &self,
        items: &dyn ResultSet<Item = T>,
        pred: impl Fn(Ordering) -> bool,
        position: &OrderingKey,
    ) -> usize {
        let (mut lo, mut hi) = (0, items.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match items.item(mid) {
                Some(item) if pred(self.ordering.compare(&self.key_of(&item), position)) => {
                    lo = mid + 1;
                }
                _ => hi = mid,
            }
        }
        lo
    }

    fn link(&self, request: &PageRequest, cursor: &Cursor) -> Result<PageLink> {
        let token = self.encode_cursor(cursor)?;
        Ok(request.link([(self.cursor_param.as_str(), token)]))
    }
}

impl<T> Paginator<T> for CursorPaginator<T> {
    fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>> {
        let limit = self.page_size.resolve(request, &self.limit_param)?;
        let cursor = self.request_cursor(request)?;
        let len = items.len();

        let (start, end) = if cursor.reverse {
            let end = match &cursor.position {
                None => len,
                Some(position) => {
                    self.partition_point(items, |ord| ord == Ordering::Less, position)
                }
            };
            (end.saturating_sub(limit), end)
        } else {
            let start = match &cursor.position {
                None => 0,
                Some(position) => {
                    self.partition_point(items, |ord| ord != Ordering::Greater, position)
                }
            };
            (start, start.saturating_add(limit).min(len))
        };

        let page = if start < end {
            items.fetch(start..end)
        } else {
            Vec::new()
        };

        debug!(
            "Cursor page [{}, {}) of {} items (reverse: {})",
            start, end, len, cursor.reverse
        );

        let next = if end < len {
            let next = page
                .last()
                .map_or_else(Cursor::start, |item| Cursor::after(self.key_of(item)));
            Some(self.link(request, &next)?)
        } else {
            None
        };

        let previous = if start > 0 {
            let previous = page
                .first()
                .map_or_else(Cursor::end, |item| Cursor::before(self.key_of(item)));
            Some(self.link(request, &previous)?)
        } else {
            None
        };

        Ok(PageResult {
            count: None,
            next,
            previous,
            items: page,
            page_size: limit,
            page: None,
        })
    }
}
