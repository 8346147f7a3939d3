//! Strategy selection
//!
//! A [`PaginationPolicy`] is one configured strategy. The request-handling
//! layer builds it once from settings and calls it for every request.

use super::strategies::{CursorPaginator, LimitOffsetPaginator, PageNumberPaginator};
use super::types::{PageRequest, PageResult, Paginator, ResultSet};
use crate::config::PaginationSettings;
use crate::cursor::OrderingKey;
use crate::error::{Error, Result};
use crate::types::{JsonValue, OrderDirection, QueryParams, StrategyKind};
use tracing::debug;

/// A configured pagination strategy
#[derive(Debug, Clone)]
pub enum PaginationPolicy<T> {
    /// `?page=N`
    PageNumber(PageNumberPaginator),
    /// `?limit=N&offset=M`
    LimitOffset(LimitOffsetPaginator),
    /// `?cursor=TOKEN`
    Cursor(CursorPaginator<T>),
}

impl<T> PaginationPolicy<T> {
    /// Build a policy from settings
    ///
    /// `key` is the ordering-key accessor; only the cursor strategy uses it.
    pub fn from_settings<F>(settings: &PaginationSettings, key: F) -> Result<Self>
    where
        F: Fn(&T) -> OrderingKey + Send + Sync + 'static,
    {
        settings.validate()?;

        Ok(match settings.strategy {
            StrategyKind::PageNumber => {
                Self::PageNumber(PageNumberPaginator::from_settings(settings))
            }
            StrategyKind::LimitOffset => {
                Self::LimitOffset(LimitOffsetPaginator::from_settings(settings))
            }
            StrategyKind::Cursor => Self::Cursor(CursorPaginator::from_settings(settings, key)),
        })
    }

    /// Which strategy this policy applies
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::PageNumber(_) => StrategyKind::PageNumber,
            Self::LimitOffset(_) => StrategyKind::LimitOffset,
            Self::Cursor(_) => StrategyKind::Cursor,
        }
    }

    /// Compute a page
    pub fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>> {
        debug!("Paginating {} items with {} strategy", items.len(), self.kind());

        match self {
            Self::PageNumber(p) => p.paginate(items, request),
            Self::LimitOffset(p) => p.paginate(items, request),
            Self::Cursor(p) => p.paginate(items, request),
        }
    }

    /// Compute a page from raw query parameters
    pub fn paginate_params(
        &self,
        items: &dyn ResultSet<Item = T>,
        params: &QueryParams,
    ) -> Result<PageResult<T>> {
        let request = PageRequest::from_params(params.clone());
        self.paginate(items, &request)
    }
}

impl<T> Paginator<T> for PaginationPolicy<T> {
    fn paginate(
        &self,
        items: &dyn ResultSet<Item = T>,
        request: &PageRequest,
    ) -> Result<PageResult<T>> {
        PaginationPolicy::paginate(self, items, request)
    }
}

impl PaginationPolicy<JsonValue> {
    /// Policy over JSON objects ordered by `settings.ordering_field`
    ///
    /// The cursor strategy requires an ordering field.
    pub fn for_json(settings: &PaginationSettings) -> Result<Self> {
        let field = settings.ordering_field.clone();

        if settings.strategy == StrategyKind::Cursor && field.is_none() {
            return Err(Error::invalid_value(
                "ordering_field",
                "cursor pagination requires an ordering field",
            ));
        }

        Self::from_settings(settings, move |item: &JsonValue| match &field {
            Some(field) => OrderingKey::from_json_field(item, field),
            None => OrderingKey::Null,
        })
    }
}

/// Sort items by ordering key in the given direction
///
/// Cursor pagination expects its result set in this order.
pub fn sort_by_ordering_key<T, F>(items: &mut [T], key: F, direction: OrderDirection)
where
    F: Fn(&T) -> OrderingKey,
{
    items.sort_by(|a, b| direction.compare(&key(a), &key(b)));
}
