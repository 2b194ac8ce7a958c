//! Ordered route registry and first-match dispatch
//!
//! Routes are tried in registration order and the first whose pattern matches
//! the whole path wins. A more specific pattern registered after a catch-all
//! is never reached.
//!
//! # Example
//! ```rust,ignore
//! let router = Router::new();
//! router.add("/", handler(|| "home"))?;
//! router.add("/about", handler(|| "about"))?;
//!
//! let mut out = Vec::new();
//! assert!(router.dispatch("/about", &mut out)?);
//! assert_eq!(out, b"about");
//! ```

use crate::{
    config::RouterConfig,
    decorator::Target,
    handler::HandlerFn,
    request::RequestParams,
    route::{Route, RouteHandle},
    RouteError, RouteResult,
};
use serde_json::Value;
use std::io::Write;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Ordered registry of routes.
///
/// The registry is guarded by a read-write lock: dispatches scan under a
/// shared lock, registration takes it exclusively. Handlers run after the
/// lock is released.
pub struct Router {
    config: RouterConfig,
    routes: RwLock<Vec<RouteHandle>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create an empty router with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RouterConfig::default(),
            routes: RwLock::new(Vec::new()),
        }
    }

    /// Create an empty router, validating `config` first.
    pub fn with_config(config: RouterConfig) -> RouteResult<Self> {
        config.validate().map_err(|e| {
            RouteError::invalid_argument(format!("Invalid router config: {}", e))
        })?;
        Ok(Self {
            config,
            routes: RwLock::new(Vec::new()),
        })
    }

    /// The router's configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn read(&self) -> RouteResult<RwLockReadGuard<'_, Vec<RouteHandle>>> {
        self.routes
            .read()
            .map_err(|_| RouteError::internal("Route registry lock poisoned"))
    }

    fn write(&self) -> RouteResult<RwLockWriteGuard<'_, Vec<RouteHandle>>> {
        self.routes
            .write()
            .map_err(|_| RouteError::internal("Route registry lock poisoned"))
    }

    /// Register a handler under `pattern` and return the new route.
    ///
    /// Duplicate patterns are accepted; the earlier registration shadows the
    /// later one at dispatch time. The pattern is compiled here, so an invalid
    /// expression fails now rather than on first dispatch.
    pub fn add(&self, pattern: impl Into<String>, handler: HandlerFn) -> RouteResult<RouteHandle> {
        let route = Route::new(pattern, handler)?;
        let mut routes = self.write()?;

        if let Some(max) = self.config.max_routes.filter(|&max| routes.len() >= max) {
            return Err(RouteError::invalid_argument(format!(
                "Route limit of {} reached, cannot register '{}'",
                max, route
            )));
        }

        tracing::debug!(pattern = %route, position = routes.len(), "Route registered");

        let handle = RouteHandle::new(route);
        routes.push(handle.clone());
        Ok(handle)
    }

    /// Register a handler, a detached route's handler, or another registered
    /// route's current handler under `pattern`.
    pub fn controller(
        &self,
        pattern: impl Into<String>,
        target: impl Into<Target>,
    ) -> RouteResult<RouteHandle> {
        let handler = target.into().handler()?;
        self.add(pattern, handler)
    }

    /// Find the first route registered with exactly `pattern`.
    ///
    /// This is literal string equality, not pattern matching. A miss is a
    /// `ROUTE_NOT_FOUND` error listing the registered patterns.
    pub fn find_route(&self, pattern: &str) -> RouteResult<RouteHandle> {
        let routes = self.read()?;
        let mut available = Vec::with_capacity(routes.len());

        for handle in routes.iter() {
            let registered = handle.pattern()?;
            if registered == pattern {
                return Ok(handle.clone());
            }
            available.push(registered);
        }

        tracing::debug!(pattern = %pattern, "Route not found");

        let mut error = RouteError::route_not_found(pattern);
        if !available.is_empty() {
            error = error.with_details(serde_json::json!({
                "available_routes": available,
                "requested": pattern
            }));
        }
        Err(error)
    }

    /// Find the first route whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> RouteResult<Option<RouteHandle>> {
        let routes = self.read()?;
        for handle in routes.iter() {
            let matched = handle.matches(path)?;
            tracing::trace!(path = %path, route = ?handle, matched, "Testing route");
            if matched {
                return Ok(Some(handle.clone()));
            }
        }
        Ok(None)
    }

    /// Run the first matching route's handler and return its value.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub fn call(&self, path: &str) -> RouteResult<Option<Value>> {
        let span = tracing::debug_span!("dispatch", request_id = %Uuid::now_v7(), path = %path);
        let _guard = span.enter();

        let Some(handle) = self.resolve(path)? else {
            tracing::debug!("No route matched");
            return Ok(None);
        };

        let pattern = handle.pattern()?;
        if self.config.debug_logging {
            tracing::info!(pattern = %pattern, "Route matched");
        } else {
            tracing::debug!(pattern = %pattern, "Route matched");
        }

        handle.invoke().map(Some)
    }

    /// Dispatch `path` and write the handler's output to `out`.
    ///
    /// Returns whether a route matched. Nothing is written on a miss.
    pub fn dispatch<W: Write>(&self, path: &str, out: &mut W) -> RouteResult<bool> {
        match self.call(path)? {
            Some(value) => {
                out.write_all(render_output(&value)?.as_bytes())?;
                out.flush()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Dispatch the path carried by a request's `url` parameter.
    ///
    /// The parameter name and the fallback path come from the router's
    /// configuration (`url` and `/` by default).
    pub fn dispatch_request<P, W>(&self, params: &P, out: &mut W) -> RouteResult<bool>
    where
        P: RequestParams + ?Sized,
        W: Write,
    {
        let path = params.get_or(&self.config.url_param, &self.config.default_url);
        self.dispatch(path, out)
    }

    /// Registered patterns in dispatch order.
    pub fn patterns(&self) -> RouteResult<Vec<String>> {
        self.read()?.iter().map(RouteHandle::pattern).collect()
    }

    /// Number of registered routes.
    pub fn len(&self) -> RouteResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> RouteResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Render a handler's value for the output stream.
///
/// Strings are written as-is, `null` as nothing, anything else as compact JSON.
pub fn render_output(value: &Value) -> RouteResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        other => Ok(serde_json::to_string(other)?),
    }
}
