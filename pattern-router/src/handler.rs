//! Handler traits and utilities

use crate::RouteResult;
use serde::Serialize;
use std::sync::Arc;

/// Boxed zero-argument handler, the value type routes store and decorators compose.
pub type HandlerFn = Arc<dyn Fn() -> RouteResult<serde_json::Value> + Send + Sync>;

/// Trait for handler functions
///
/// Automatically implemented for closures and functions with the signature:
/// `fn() -> RouteResult<Output>`
pub trait Handler<Output>: Send + Sync + 'static
where
    Output: Serialize + 'static,
{
    /// Run the handler's deferred computation
    fn call(&self) -> RouteResult<Output>;
}

impl<Output, F> Handler<Output> for F
where
    Output: Serialize + 'static,
    F: Fn() -> RouteResult<Output> + Send + Sync + 'static,
{
    fn call(&self) -> RouteResult<Output> {
        (self)()
    }
}

/// Convert a handler into a boxed handler for storage
pub fn into_boxed<Output, H>(handler: H) -> HandlerFn
where
    Output: Serialize + 'static,
    H: Handler<Output>,
{
    Arc::new(move || -> RouteResult<serde_json::Value> {
        let output = handler.call()?;
        Ok(serde_json::to_value(output)?)
    })
}

/// Box an infallible closure as a handler.
///
/// # Example
/// ```rust,ignore
/// let home = handler(|| "home");
/// assert_eq!(home().unwrap(), serde_json::json!("home"));
/// ```
pub fn handler<Output, F>(f: F) -> HandlerFn
where
    Output: Serialize + 'static,
    F: Fn() -> Output + Send + Sync + 'static,
{
    into_boxed(move || -> RouteResult<Output> { Ok(f()) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteError;
    use serde_json::json;

    #[test]
    fn test_handler_serializes_output() {
        let h = handler(|| vec!["Say", "Hello"]);
        assert_eq!(h().unwrap(), json!(["Say", "Hello"]));
    }

    #[test]
    fn test_into_boxed_propagates_errors() {
        let h = into_boxed(|| -> RouteResult<String> { Err(RouteError::internal("boom")) });
        let err = h().unwrap_err();
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn test_handler_captures_state() {
        let n = 7;
        let h = handler(move || n * n);
        assert_eq!(h().unwrap(), json!(49));
    }
}
