//! Configuration module for the router.
//!
//! This module provides the [`RouterConfig`] struct for customizing how a
//! [`Router`](crate::Router) reads requests and reports what it does.
//!
//! # Example
//! ```rust,ignore
//! use pattern_router::RouterConfig;
//!
//! let config = RouterConfig::new()
//!     .with_url_param("page")
//!     .with_default_url("/home")
//!     .with_max_routes(256)
//!     .with_debug_logging(true);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when [`RouterConfig::validate`] rejects a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// url_param must not be empty
    EmptyUrlParam,
    /// max_routes must be greater than 0 when set
    InvalidMaxRoutes,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrlParam => write!(f, "url_param must not be empty"),
            Self::InvalidMaxRoutes => write!(f, "max_routes must be greater than 0"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Router configuration.
///
/// # Fields
///
/// * `url_param` - Request parameter holding the path to dispatch. Default: `"url"`.
///
/// * `default_url` - Path dispatched when the request has no `url_param`.
///   Default: `"/"`.
///
/// * `max_routes` - Optional cap on registered routes. Registration beyond the
///   cap fails with `INVALID_ARGUMENT`. Default: unlimited.
///
/// * `debug_logging` - Log dispatch matches at `info` instead of `debug`.
///   Default: false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Request parameter holding the path (default: "url")
    pub url_param: String,
    /// Path used when the parameter is absent (default: "/")
    pub default_url: String,
    /// Maximum number of routes (default: None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_routes: Option<usize>,
    /// Enable verbose dispatch logging (default: false)
    pub debug_logging: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            url_param: "url".to_string(),
            default_url: "/".to_string(),
            max_routes: None,
            debug_logging: false,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the router cannot work with.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.url_param.is_empty() {
            return Err(ConfigValidationError::EmptyUrlParam);
        }
        if self.max_routes == Some(0) {
            return Err(ConfigValidationError::InvalidMaxRoutes);
        }
        Ok(())
    }

    /// Set the request parameter that carries the path.
    pub fn with_url_param(mut self, name: impl Into<String>) -> Self {
        self.url_param = name.into();
        self
    }

    /// Set the path dispatched when the parameter is missing.
    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    /// Cap the number of routes the router accepts.
    pub fn with_max_routes(mut self, max: usize) -> Self {
        self.max_routes = Some(max);
        self
    }

    /// Enable or disable verbose dispatch logging.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}
