//! Handler decoration
//!
//! A decorator wraps a handler so that its result is post-processed before
//! being returned. Decorating a route swaps the route's handler for the
//! composed one; decorating a bare handler returns a new handler and leaves
//! the original alone.
//!
//! Decorations nest: `decorator(g, decorator(f, route))` produces a handler
//! returning `g(f(inner()))`.

use crate::{
    handler::HandlerFn,
    route::{Route, RouteHandle},
    RouteResult,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Post-processing function applied to a handler's result.
pub type PostProcessFn = Arc<dyn Fn(Value) -> RouteResult<Value> + Send + Sync>;

/// Create a post-processor from an infallible function.
///
/// # Example
/// ```rust,ignore
/// let upper = post_process(|v| match v {
///     Value::String(s) => Value::String(s.to_uppercase()),
///     other => other,
/// });
/// ```
pub fn post_process<F>(f: F) -> PostProcessFn
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(move |value: Value| -> RouteResult<Value> { Ok(f(value)) })
}

/// Create a post-processor from a fallible function.
pub fn try_post_process<F>(f: F) -> PostProcessFn
where
    F: Fn(Value) -> RouteResult<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Something a decorator can wrap or a controller can register.
#[derive(Clone)]
pub enum Target {
    /// A bare handler; decoration returns a new handler
    Handler(HandlerFn),
    /// A detached route; decoration replaces its handler
    Route(Route),
    /// A route registered in a router; decoration replaces its handler in place
    Registered(RouteHandle),
}

impl Target {
    /// Resolve the target to the handler it currently runs.
    pub fn handler(&self) -> RouteResult<HandlerFn> {
        match self {
            Self::Handler(handler) => Ok(handler.clone()),
            Self::Route(route) => Ok(route.handler()),
            Self::Registered(handle) => handle.handler(),
        }
    }

    /// Invoke the target's current handler.
    pub fn invoke(&self) -> RouteResult<Value> {
        let handler = self.handler()?;
        handler()
    }

    /// Returns the handler if this target is a bare handler.
    pub fn into_handler(self) -> Option<HandlerFn> {
        match self {
            Self::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// Returns the route if this target is a detached route.
    pub fn into_route(self) -> Option<Route> {
        match self {
            Self::Route(route) => Some(route),
            _ => None,
        }
    }

    /// Returns the handle if this target is a registered route.
    pub fn into_registered(self) -> Option<RouteHandle> {
        match self {
            Self::Registered(handle) => Some(handle),
            _ => None,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(<fn>)"),
            Self::Route(route) => f.debug_tuple("Route").field(route).finish(),
            Self::Registered(handle) => f.debug_tuple("Registered").field(handle).finish(),
        }
    }
}

impl From<HandlerFn> for Target {
    fn from(handler: HandlerFn) -> Self {
        Self::Handler(handler)
    }
}

impl From<Route> for Target {
    fn from(route: Route) -> Self {
        Self::Route(route)
    }
}

impl From<RouteHandle> for Target {
    fn from(handle: RouteHandle) -> Self {
        Self::Registered(handle)
    }
}

/// Compose `post` around a handler: call the handler, then post-process.
pub fn compose(post: PostProcessFn, inner: HandlerFn) -> HandlerFn {
    Arc::new(move || -> RouteResult<Value> { post(inner()?) })
}

/// Decorate a handler or route with a post-processor.
///
/// Returns a target of the same kind as the one given. Routes, detached or
/// registered, have their handler replaced; a bare handler is wrapped in a new
/// handler.
pub fn decorator(post: PostProcessFn, target: impl Into<Target>) -> RouteResult<Target> {
    match target.into() {
        Target::Handler(handler) => Ok(Target::Handler(compose(post, handler))),
        Target::Route(mut route) => {
            tracing::debug!(pattern = %route, "Decorating route");
            let composed = compose(post, route.handler());
            route.set_handler(composed);
            Ok(Target::Route(route))
        }
        Target::Registered(handle) => {
            handle.decorate(post)?;
            Ok(Target::Registered(handle))
        }
    }
}
