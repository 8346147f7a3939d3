//! JSON datasets served by the CLI and HTTP front end

use crate::config::PaginationSettings;
use crate::cursor::OrderingKey;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{sort_by_ordering_key, PageRequest, PageResult, PaginationPolicy};
use crate::types::JsonValue;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A JSON array paired with the policy that pages through it
///
/// Items are sorted by `ordering_field` when one is configured, so the
/// cursor strategy sees them in key order.
#[derive(Debug)]
pub struct Dataset {
    items: Vec<JsonValue>,
    policy: PaginationPolicy<JsonValue>,
}

impl Dataset {
    /// Create a dataset from items
    pub fn new(mut items: Vec<JsonValue>, settings: &PaginationSettings) -> Result<Self> {
        let policy = PaginationPolicy::for_json(settings)?;

        if let Some(field) = &settings.ordering_field {
            sort_by_ordering_key(
                &mut items,
                |item| OrderingKey::from_json_field(item, field),
                settings.ordering,
            );
        }

        Ok(Self { items, policy })
    }

    /// Load a JSON array file
    pub fn load(path: impl AsRef<Path>, settings: &PaginationSettings) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset '{}'", path.display()))?;

        let parsed: JsonValue = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset '{}'", path.display()))?;

        let items = match parsed {
            JsonValue::Array(items) => items,
            _ => {
                return Err(Error::config(format!(
                    "'{}' must contain a JSON array",
                    path.display()
                )))
            }
        };

        debug!("Loaded {} items from {}", items.len(), path.display());
        Self::new(items, settings)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the dataset has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The configured policy
    pub fn policy(&self) -> &PaginationPolicy<JsonValue> {
        &self.policy
    }

    /// Compute a page
    pub fn paginate(&self, request: &PageRequest) -> Result<PageResult<JsonValue>> {
        self.policy.paginate(&self.items, request)
    }
}
