//! Pagination settings
//!
//! Settings are declared in YAML (or JSON) and describe one pagination
//! policy: which strategy to use, the size bounds and the query parameter
//! names it reads.
//!
//! ```yaml
//! strategy: cursor
//! default_page_size: 20
//! max_page_size: 100
//! ordering: desc
//! ordering_field: created
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::{OrderDirection, OutOfRange, StrategyKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Settings
// ============================================================================

/// Configuration for a pagination policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationSettings {
    /// Strategy to apply
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Page size used when the client does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Ceiling for client-requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Query parameter carrying the page size (page-number strategy)
    #[serde(default = "default_page_size_param")]
    pub page_size_param: String,

    /// Query parameter carrying the page number
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the limit (limit/offset and cursor strategies)
    #[serde(default = "default_limit_param")]
    pub limit_param: String,

    /// Query parameter carrying the offset
    #[serde(default = "default_offset_param")]
    pub offset_param: String,

    /// Query parameter carrying the cursor token
    #[serde(default = "default_cursor_param")]
    pub cursor_param: String,

    /// Page values that select the final page (e.g. `?page=last`)
    #[serde(default = "default_last_page_strings")]
    pub last_page_strings: Vec<String>,

    /// Whether page 1 of an empty result set is a valid, empty page
    #[serde(default = "default_true")]
    pub allow_empty_first_page: bool,

    /// Behaviour for page numbers past the last page
    #[serde(default)]
    pub out_of_range: OutOfRange,

    /// Direction of the ordering key (cursor strategy)
    #[serde(default)]
    pub ordering: OrderDirection,

    /// JSON field holding the ordering key of each item
    #[serde(default)]
    pub ordering_field: Option<String>,

    /// Secret used to sign cursor tokens; unsigned base64 when absent
    #[serde(default)]
    pub cursor_secret: Option<String>,
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

fn default_page_size_param() -> String {
    "page_size".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_cursor_param() -> String {
    "cursor".to_string()
}

fn default_last_page_strings() -> Vec<String> {
    vec!["last".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            page_size_param: default_page_size_param(),
            page_param: default_page_param(),
            limit_param: default_limit_param(),
            offset_param: default_offset_param(),
            cursor_param: default_cursor_param(),
            last_page_strings: default_last_page_strings(),
            allow_empty_first_page: true,
            out_of_range: OutOfRange::default(),
            ordering: OrderDirection::default(),
            ordering_field: None,
            cursor_secret: None,
        }
    }
}

impl PaginationSettings {
    /// Settings for the given strategy with default bounds
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Set the default and maximum page sizes
    #[must_use]
    pub fn with_page_sizes(mut self, default_page_size: usize, max_page_size: usize) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    /// Set the out-of-range behaviour
    #[must_use]
    pub fn with_out_of_range(mut self, out_of_range: OutOfRange) -> Self {
        self.out_of_range = out_of_range;
        self
    }

    /// Set the ordering direction and, optionally, the JSON ordering field
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderDirection, field: Option<&str>) -> Self {
        self.ordering = ordering;
        self.ordering_field = field.map(String::from);
        self
    }

    /// Sign cursor tokens with the given secret
    #[must_use]
    pub fn with_cursor_secret(mut self, secret: impl Into<String>) -> Self {
        self.cursor_secret = Some(secret.into());
        self
    }

    /// Check the settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(Error::invalid_value(
                "default_page_size",
                "must be a positive integer",
            ));
        }

        if self.max_page_size < self.default_page_size {
            return Err(Error::invalid_value(
                "max_page_size",
                format!(
                    "must be at least default_page_size ({})",
                    self.default_page_size
                ),
            ));
        }

        let params = [
            ("page_size_param", &self.page_size_param),
            ("page_param", &self.page_param),
            ("limit_param", &self.limit_param),
            ("offset_param", &self.offset_param),
            ("cursor_param", &self.cursor_param),
        ];

        for (field, name) in &params {
            if name.trim().is_empty() {
                return Err(Error::invalid_value(*field, "parameter name cannot be empty"));
            }
        }

        for (i, (field, name)) in params.iter().enumerate() {
            if let Some((other, _)) = params[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(Error::invalid_value(
                    *field,
                    format!("parameter name '{name}' is also used by {other}"),
                ));
            }
        }

        if let Some(secret) = &self.cursor_secret {
            if secret.is_empty() {
                return Err(Error::invalid_value(
                    "cursor_secret",
                    "secret cannot be empty",
                ));
            }
        }

        if let Some(field) = &self.ordering_field {
            if field.trim().is_empty() {
                return Err(Error::invalid_value(
                    "ordering_field",
                    "field name cannot be empty",
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load settings from a YAML or JSON file (chosen by extension)
pub fn load_settings(path: impl AsRef<Path>) -> Result<PaginationSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_settings_from_json(&content)
    } else {
        load_settings_from_str(&content)
    }
}

/// Load settings from a YAML string
pub fn load_settings_from_str(yaml: &str) -> Result<PaginationSettings> {
    // An empty document means "all defaults"
    if yaml.trim().is_empty() {
        return Ok(PaginationSettings::default());
    }

    let settings: PaginationSettings = serde_yaml::from_str(yaml)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from a JSON string
pub fn load_settings_from_json(json: &str) -> Result<PaginationSettings> {
    let settings: PaginationSettings = serde_json::from_str(json)?;
    settings.validate()?;
    Ok(settings)
}
