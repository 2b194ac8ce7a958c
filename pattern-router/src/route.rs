//! Route bindings between a match pattern and a handler
//!
//! A [`Route`] is a plain value: cloning it yields a new route with the same
//! pattern and the same handler function, in its own handler slot. A
//! [`RouteHandle`] is a shared reference to a route stored in a
//! [`Router`](crate::Router); replacing the handler through a handle changes
//! what the router dispatches to.

use crate::{
    decorator::{compose, PostProcessFn},
    handler::HandlerFn,
    RouteError, RouteResult,
};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A named binding between a pattern and a handler.
#[derive(Clone)]
pub struct Route {
    pattern: String,
    matcher: Regex,
    handler: HandlerFn,
}

impl Route {
    /// Create a route, compiling `pattern` as a full-string regular expression.
    ///
    /// Fails with `INVALID_PATTERN` if the pattern does not compile.
    pub fn new(pattern: impl Into<String>, handler: HandlerFn) -> RouteResult<Self> {
        let pattern = pattern.into();
        let matcher = compile_pattern(&pattern)?;
        Ok(Self {
            pattern,
            matcher,
            handler,
        })
    }

    /// The pattern this route was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The current handler.
    pub fn handler(&self) -> HandlerFn {
        self.handler.clone()
    }

    /// Replace the handler in place.
    pub fn set_handler(&mut self, handler: HandlerFn) {
        self.handler = handler;
    }

    /// Test the anchored pattern against a request path.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Invoke the current handler.
    pub fn invoke(&self) -> RouteResult<serde_json::Value> {
        (self.handler)()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Compile a route pattern into a regex anchored at both ends.
///
/// The pattern is wrapped in a non-capturing group so that alternations are
/// anchored as a whole: `a|b` only matches `a` or `b`, never `xb`.
///
/// The bare pattern is checked first: an unbalanced one such as `a)|(b`
/// would otherwise close the group early and escape the anchors.
pub(crate) fn compile_pattern(pattern: &str) -> RouteResult<Regex> {
    let invalid = |e: regex::Error| {
        RouteError::invalid_pattern(pattern)
            .with_details(serde_json::json!({ "pattern": pattern }))
            .with_cause(e.to_string())
    };
    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{})$", pattern)).map_err(invalid)
}

/// Shared handle to a route registered in a router.
///
/// Cloning the handle aliases the same route. Use [`RouteHandle::to_route`]
/// for an independent copy.
#[derive(Clone)]
pub struct RouteHandle {
    inner: Arc<RwLock<Route>>,
}

impl RouteHandle {
    pub(crate) fn new(route: Route) -> Self {
        Self {
            inner: Arc::new(RwLock::new(route)),
        }
    }

    fn read(&self) -> RouteResult<RwLockReadGuard<'_, Route>> {
        self.inner
            .read()
            .map_err(|_| RouteError::internal("Route lock poisoned"))
    }

    fn write(&self) -> RouteResult<RwLockWriteGuard<'_, Route>> {
        self.inner
            .write()
            .map_err(|_| RouteError::internal("Route lock poisoned"))
    }

    /// The registered pattern.
    pub fn pattern(&self) -> RouteResult<String> {
        Ok(self.read()?.pattern.clone())
    }

    /// The handler the router currently dispatches to.
    pub fn handler(&self) -> RouteResult<HandlerFn> {
        Ok(self.read()?.handler())
    }

    /// Swap the registered route's handler.
    pub fn set_handler(&self, handler: HandlerFn) -> RouteResult<()> {
        self.write()?.set_handler(handler);
        Ok(())
    }

    /// Wrap the registered handler with `post`.
    ///
    /// The read of the current handler and the swap happen under one write
    /// lock, so concurrent decorations of the same route all apply.
    pub fn decorate(&self, post: PostProcessFn) -> RouteResult<()> {
        let mut route = self.write()?;
        let composed = compose(post, route.handler());
        route.set_handler(composed);
        tracing::debug!(pattern = %route.pattern, "Decorated registered route");
        Ok(())
    }

    /// Test the registered pattern against a request path.
    pub fn matches(&self, path: &str) -> RouteResult<bool> {
        Ok(self.read()?.matches(path))
    }

    /// Invoke the current handler.
    ///
    /// The lock is released before the handler runs.
    pub fn invoke(&self) -> RouteResult<serde_json::Value> {
        let handler = self.handler()?;
        handler()
    }

    /// Copy the route out of the registry.
    ///
    /// The copy starts with the same handler function, but decorating it does
    /// not affect the registered route.
    pub fn to_route(&self) -> RouteResult<Route> {
        Ok(self.read()?.clone())
    }

    /// Returns true if both handles refer to the same registered route.
    pub fn ptr_eq(&self, other: &RouteHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(route) => f.debug_tuple("RouteHandle").field(&*route).finish(),
            Err(_) => f.write_str("RouteHandle(<poisoned>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handler::handler, RouteErrorCode};
    use serde_json::json;

    #[test]
    fn test_display_is_pattern() {
        let route = Route::new("/?json", handler(|| "x")).unwrap();
        assert_eq!(route.to_string(), "/?json");
        assert_eq!(route.pattern(), "/?json");
    }

    #[test]
    fn test_pattern_is_anchored() {
        let route = Route::new("/about", handler(|| "about")).unwrap();
        assert!(route.matches("/about"));
        assert!(!route.matches("/about/team"));
        assert!(!route.matches("x/about"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let route = Route::new("a|b", handler(|| "ab")).unwrap();
        assert!(route.matches("a"));
        assert!(route.matches("b"));
        assert!(!route.matches("xb"));
        assert!(!route.matches("ax"));
    }

    #[test]
    fn test_slashes_are_literal() {
        let route = Route::new("/?another", handler(|| "another")).unwrap();
        assert!(route.matches("another"));
        assert!(route.matches("/another"));
        assert!(!route.matches("//another"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Route::new("([", handler(|| "x")).unwrap_err();
        assert_eq!(err.code, RouteErrorCode::InvalidPattern);
        assert!(err.cause.is_some());
    }

    #[test]
    fn test_unbalanced_pattern_cannot_escape_anchors() {
        for pattern in ["a)|(b", "a)(b", ")"] {
            let err = Route::new(pattern, handler(|| "x")).unwrap_err();
            assert_eq!(err.code, RouteErrorCode::InvalidPattern, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_handle_decorate_wraps_registered_handler() {
        let handle = RouteHandle::new(Route::new("/", handler(|| "home")).unwrap());
        let alias = handle.clone();
        handle
            .decorate(crate::post_process(|v| match v {
                serde_json::Value::String(s) => serde_json::Value::String(s.to_uppercase()),
                other => other,
            }))
            .unwrap();
        assert_eq!(alias.invoke().unwrap(), json!("HOME"));
    }

    #[test]
    fn test_clone_has_independent_handler_slot() {
        let original = Route::new("/", handler(|| "home")).unwrap();
        let mut copy = original.clone();
        copy.set_handler(handler(|| "changed"));

        assert_eq!(original.invoke().unwrap(), json!("home"));
        assert_eq!(copy.invoke().unwrap(), json!("changed"));
    }

    #[test]
    fn test_clone_shares_handler_value() {
        let original = Route::new("/", handler(|| "home")).unwrap();
        let copy = original.clone();
        assert!(Arc::ptr_eq(&original.handler(), &copy.handler()));
    }

    #[test]
    fn test_handle_aliases_route() {
        let handle = RouteHandle::new(Route::new("/", handler(|| "home")).unwrap());
        let alias = handle.clone();
        alias.set_handler(handler(|| "swapped")).unwrap();

        assert!(handle.ptr_eq(&alias));
        assert_eq!(handle.invoke().unwrap(), json!("swapped"));
    }

    #[test]
    fn test_handle_to_route_is_detached() {
        let handle = RouteHandle::new(Route::new("/", handler(|| "home")).unwrap());
        let mut detached = handle.to_route().unwrap();
        detached.set_handler(handler(|| "detached"));

        assert_eq!(handle.invoke().unwrap(), json!("home"));
        assert_eq!(detached.invoke().unwrap(), json!("detached"));
    }
}
