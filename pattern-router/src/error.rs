//! Error types for routing operations
//!
//! Every fallible operation in this crate returns a [`RouteResult`], carrying a
//! [`RouteError`] with a type-safe [`RouteErrorCode`]. When serialized, codes
//! are converted to SCREAMING_SNAKE_CASE strings.
//!
//! # Example
//! ```rust,ignore
//! use pattern_router::{RouteError, RouteErrorCode};
//!
//! let error = RouteError::new(RouteErrorCode::RouteNotFound, "No route '/about'");
//! let error = RouteError::route_not_found("/about"); // Convenience method
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe error codes for routing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteErrorCode {
    /// An argument was rejected at construction time (curry arity, route limit)
    InvalidArgument,
    /// No route is registered under the requested pattern
    RouteNotFound,
    /// A pattern failed to compile as a regular expression
    InvalidPattern,
    /// A template file does not exist
    TemplateMissing,
    /// A template could not be read or rendered
    TemplateError,
    /// JSON serialization failed
    SerializationError,
    /// Writing to the output sink failed
    IoError,
    /// An unexpected internal error occurred
    InternalError,
}

impl RouteErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::InvalidPattern => "INVALID_PATTERN",
            Self::TemplateMissing => "TEMPLATE_MISSING",
            Self::TemplateError => "TEMPLATE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::IoError => "IO_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was caused by how the router was configured
    /// (bad arguments, patterns or lookups) rather than by a runtime failure.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::RouteNotFound | Self::InvalidPattern
        )
    }
}

impl fmt::Display for RouteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Routing error with type-safe code and message.
///
/// # Example
/// ```rust,ignore
/// use pattern_router::RouteError;
///
/// let error = RouteError::invalid_pattern("([")
///     .with_details(serde_json::json!({ "pattern": "([" }))
///     .with_cause("unclosed group");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct RouteError {
    /// Type-safe error code
    pub code: RouteErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (JSON value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Optional underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RouteError {
    /// Create a new error with code and message.
    pub fn new(code: RouteErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Add a cause string for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    // Convenience constructors

    /// Create an INVALID_ARGUMENT error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::InvalidArgument, message)
    }

    /// Create a ROUTE_NOT_FOUND error for a lookup pattern.
    pub fn route_not_found(pattern: &str) -> Self {
        Self::new(
            RouteErrorCode::RouteNotFound,
            format!("Route '{}' not found", pattern),
        )
    }

    /// Create an INVALID_PATTERN error.
    pub fn invalid_pattern(pattern: &str) -> Self {
        Self::new(
            RouteErrorCode::InvalidPattern,
            format!("Pattern '{}' is not a valid expression", pattern),
        )
    }

    /// Create a TEMPLATE_MISSING error.
    pub fn template_missing(path: impl fmt::Display) -> Self {
        Self::new(
            RouteErrorCode::TemplateMissing,
            format!("Template '{}' does not exist", path),
        )
    }

    /// Create a TEMPLATE_ERROR error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::TemplateError, message)
    }

    /// Create a SERIALIZATION_ERROR error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::SerializationError, message)
    }

    /// Create an INTERNAL_ERROR error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for RouteError {
    fn from(err: std::io::Error) -> Self {
        Self::new(RouteErrorCode::IoError, format!("IO error: {}", err))
    }
}

impl From<regex::Error> for RouteError {
    fn from(err: regex::Error) -> Self {
        Self::new(RouteErrorCode::InvalidPattern, "Invalid regular expression")
            .with_cause(err.to_string())
    }
}

/// Result type alias for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
