//! Error types for Solidafy Pager
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy Pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// Page number is malformed, below 1, or past the last page
    #[error("Invalid page ('{param}'): {message}")]
    InvalidPage {
        /// Query parameter that carried the page
        param: String,
        /// Client-facing explanation
        message: String,
    },

    /// Offset is malformed or negative
    #[error("Invalid offset ('{param}'): {message}")]
    InvalidOffset {
        /// Query parameter that carried the offset
        param: String,
        /// Client-facing explanation
        message: String,
    },

    /// Cursor token failed to decode or verify
    #[error("Invalid cursor ('{param}'): {message}")]
    InvalidCursor {
        /// Query parameter that carried the token
        param: String,
        /// Client-facing explanation
        message: String,
    },

    /// Requested page size is malformed, zero or negative
    #[error("Invalid page size ('{param}'): {message}")]
    InvalidPageSize {
        /// Query parameter that carried the size
        param: String,
        /// Client-facing explanation
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// General configuration problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A settings field holds an unusable value
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Settings field name
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// Settings YAML did not parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Settings or dataset JSON did not parse
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Request URL did not parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or dataset file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else, usually a message with added context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid page error
    pub fn invalid_page(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPage {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid offset error
    pub fn invalid_offset(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOffset {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid page size error
    pub fn invalid_page_size(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPageSize {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the request parameter that caused a pagination error
    pub fn param(&self) -> Option<&str> {
        match self {
            Error::InvalidPage { param, .. }
            | Error::InvalidOffset { param, .. }
            | Error::InvalidCursor { param, .. }
            | Error::InvalidPageSize { param, .. } => Some(param),
            _ => None,
        }
    }

    /// Check if this error was caused by client-supplied paging parameters
    pub fn is_pagination_error(&self) -> bool {
        self.param().is_some()
    }

    /// Human-readable detail without the error-kind prefix
    pub fn detail(&self) -> String {
        match self {
            Error::InvalidPage { message, .. }
            | Error::InvalidOffset { message, .. }
            | Error::InvalidCursor { message, .. }
            | Error::InvalidPageSize { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for Solidafy Pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
