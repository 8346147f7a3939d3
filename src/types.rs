//! Common types used throughout Solidafy Pager
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Client query parameters, kept sorted so generated links are stable
pub type QueryParams = BTreeMap<String, String>;

// ============================================================================
// Strategy Selection
// ============================================================================

/// Which pagination strategy a policy uses
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `?page=2&page_size=20`
    #[default]
    PageNumber,
    /// `?limit=20&offset=40`
    LimitOffset,
    /// `?cursor=<opaque>&limit=20`
    Cursor,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::PageNumber => write!(f, "page_number"),
            StrategyKind::LimitOffset => write!(f, "limit_offset"),
            StrategyKind::Cursor => write!(f, "cursor"),
        }
    }
}

/// What a page-number request past the last page produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRange {
    /// Fail with `InvalidPage`
    #[default]
    Error,
    /// Return an empty page
    Empty,
}

// ============================================================================
// Ordering
// ============================================================================

/// Direction of the ordering key over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Smallest key first
    #[default]
    Asc,
    /// Largest key first
    Desc,
}

impl OrderDirection {
    /// Compare two keys in traversal order
    pub fn compare<K: Ord + ?Sized>(self, a: &K, b: &K) -> Ordering {
        match self {
            OrderDirection::Asc => a.cmp(b),
            OrderDirection::Desc => b.cmp(a),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Everything, including per-request detail
    Trace,
    /// Paging decisions such as clamped sizes
    Debug,
    /// Startup and server events
    Info,
    /// Rejected cursors and unexpected failures
    Warn,
    /// Errors only
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction_compare() {
        assert_eq!(OrderDirection::Asc.compare(&1, &2), Ordering::Less);
        assert_eq!(OrderDirection::Desc.compare(&1, &2), Ordering::Greater);
        assert_eq!(OrderDirection::Desc.compare(&3, &3), Ordering::Equal);
    }

    #[test]
    fn test_strategy_kind_serde() {
        let kind: StrategyKind = serde_json::from_str("\"limit_offset\"").unwrap();
        assert_eq!(kind, StrategyKind::LimitOffset);
        assert_eq!(StrategyKind::Cursor.to_string(), "cursor");
        assert_eq!(StrategyKind::default(), StrategyKind::PageNumber);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
