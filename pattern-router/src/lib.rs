//! # Pattern Router
//!
//! A minimal request-routing engine: an ordered registry of pattern → handler
//! bindings, a first-match dispatcher, and a composition layer for wrapping
//! (decorating) and partially applying (currying) handlers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pattern_router::prelude::*;
//!
//! let router = Router::new();
//! router.add("/", handler(|| "home"))?;
//! router.add("/?about", handler(|| "about"))?;
//!
//! // Wrap a handler's output
//! let shout = post_process(|v| match v {
//!     Value::String(s) => Value::String(s.to_uppercase()),
//!     other => other,
//! });
//! router.controller("/?loud", decorator(shout, router.find_route("/?about")?.to_route()?)?)?;
//!
//! // Serve one request
//! let params = QueryParams::parse("url=/loud");
//! router.dispatch_request(&params, &mut std::io::stdout())?;
//! ```
//!
//! ## Matching
//!
//! During dispatch each pattern is a regular expression anchored at both
//! ends and tried in registration order; the first match wins. Lookup with
//! [`Router::find_route`] compares patterns literally.
//!
//! ## Module Structure
//!
//! - [`Router`] - Route registry and dispatch
//! - [`Route`] / [`RouteHandle`] - Detached and registered routes
//! - [`Handler`] - Handler trait and boxing helpers
//! - [`decorator`] - Post-processing composition
//! - [`curry`](mod@curry) - Partial application with declared arity
//! - [`RequestParams`] - Request parameter sources
//! - [`TemplateEngine`] - File-based template rendering
//! - [`RouteError`] - Error types and codes
//! - [`RouterConfig`] - Router configuration

mod config;
pub mod curry;
pub mod decorator;
mod error;
mod handler;
mod request;
mod route;
mod router;
pub mod template;

#[cfg(test)]
mod tests;

pub use config::{ConfigValidationError, RouterConfig};
pub use curry::{curry, Applied, Curry, CurryTarget};
pub use decorator::{compose, decorator, post_process, try_post_process, PostProcessFn, Target};
pub use error::{RouteError, RouteErrorCode, RouteResult};
pub use handler::{handler, into_boxed, Handler, HandlerFn};
pub use request::{QueryParams, RequestParams};
pub use route::{Route, RouteHandle};
pub use router::{render_output, Router};
pub use template::{TemplateConfig, TemplateEngine};

/// Prelude for convenient imports
///
/// ```rust,ignore
/// use pattern_router::prelude::*;
/// ```
pub mod prelude {
    pub use crate::curry::curry;
    pub use crate::decorator::decorator;
    pub use crate::handler::{handler, into_boxed};
    pub use crate::{
        post_process, try_post_process, Applied, Curry, Handler, HandlerFn, PostProcessFn,
        QueryParams, RequestParams, Route, RouteError, RouteErrorCode, RouteHandle,
        RouteResult, Router, RouterConfig, Target, TemplateConfig, TemplateEngine,
    };
    pub use serde_json::Value;
}
