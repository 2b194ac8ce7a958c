//! Partial application with an explicit declared arity
//!
//! A [`Curry`] holds a target function, the number of arguments it declares
//! and the arguments accumulated so far. Applying more arguments never
//! mutates a `Curry`; it produces either the target's result, once the
//! argument count reaches the declared arity, or a new `Curry` carrying the
//! merged arguments.
//!
//! # Example
//! ```rust,ignore
//! use pattern_router::{curry, Applied};
//! use serde_json::{json, Value};
//!
//! let add3 = curry(
//!     |args: &[Value]| Ok(json!(args.iter().filter_map(Value::as_i64).sum::<i64>())),
//!     3,
//!     [json!(1)],
//! )?;
//!
//! let Applied::Partial(add2) = add3.apply([json!(2)])? else { unreachable!() };
//! let Applied::Complete(sum) = add2.apply([json!(3)])? else { unreachable!() };
//! assert_eq!(sum, json!(6));
//! ```

use crate::{
    decorator::PostProcessFn,
    handler::HandlerFn,
    RouteError, RouteResult,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Boxed curry target, invoked with the full argument list.
pub type CurryTarget = Arc<dyn Fn(&[Value]) -> RouteResult<Value> + Send + Sync>;

/// Outcome of applying arguments to a [`Curry`].
pub enum Applied {
    /// The declared arity was reached and the target returned this value
    Complete(Value),
    /// More arguments are needed
    Partial(Curry),
}

impl Applied {
    /// Returns the value if the target was invoked.
    pub fn complete(self) -> Option<Value> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Partial(_) => None,
        }
    }

    /// Returns the remaining curry if more arguments are needed.
    pub fn partial(self) -> Option<Curry> {
        match self {
            Self::Complete(_) => None,
            Self::Partial(curry) => Some(curry),
        }
    }
}

impl fmt::Debug for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(value) => f.debug_tuple("Complete").field(value).finish(),
            Self::Partial(curry) => f.debug_tuple("Partial").field(curry).finish(),
        }
    }
}

/// A partially applied function.
#[derive(Clone)]
pub struct Curry {
    target: CurryTarget,
    arity: usize,
    args: Vec<Value>,
}

/// Capture `target` with its declared `arity` and the initial arguments.
///
/// Fails with `INVALID_ARGUMENT` when no initial arguments are given, since
/// there would be nothing to fix, or when they already exceed the arity.
pub fn curry<F, I>(target: F, arity: usize, initial_args: I) -> RouteResult<Curry>
where
    F: Fn(&[Value]) -> RouteResult<Value> + Send + Sync + 'static,
    I: IntoIterator<Item = Value>,
{
    let args: Vec<Value> = initial_args.into_iter().collect();
    if args.is_empty() {
        return Err(RouteError::invalid_argument(
            "Cannot curry without at least one argument",
        ));
    }
    if args.len() > arity {
        return Err(too_many_arguments(arity, args.len()));
    }

    tracing::trace!(arity, supplied = args.len(), "Curried function");

    Ok(Curry {
        target: Arc::new(target),
        arity,
        args,
    })
}

fn too_many_arguments(arity: usize, supplied: usize) -> RouteError {
    RouteError::invalid_argument(format!(
        "Curried function takes {} arguments but {} were supplied",
        arity, supplied
    ))
    .with_details(serde_json::json!({ "arity": arity, "supplied": supplied }))
}

impl Curry {
    /// The target's declared parameter count.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Arguments accumulated so far.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Number of arguments still missing.
    pub fn remaining(&self) -> usize {
        self.arity - self.args.len()
    }

    /// Merge `extra` onto the accumulated arguments.
    ///
    /// The target runs only when the merged count equals the declared arity.
    pub fn apply<I>(&self, extra: I) -> RouteResult<Applied>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut args = self.args.clone();
        args.extend(extra);

        if args.len() > self.arity {
            return Err(too_many_arguments(self.arity, args.len()));
        }

        if args.len() == self.arity {
            tracing::trace!(arity = self.arity, "Invoking curried target");
            return (self.target)(&args).map(Applied::Complete);
        }

        Ok(Applied::Partial(Curry {
            target: self.target.clone(),
            arity: self.arity,
            args,
        }))
    }

    /// Invoke with no additional arguments.
    pub fn call(&self) -> RouteResult<Applied> {
        self.apply(std::iter::empty())
    }

    /// Apply arguments that must complete the call.
    ///
    /// Fails with `INVALID_ARGUMENT` if the target is still short of arguments.
    pub fn complete_with<I>(&self, extra: I) -> RouteResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        match self.apply(extra)? {
            Applied::Complete(value) => Ok(value),
            Applied::Partial(rest) => Err(RouteError::invalid_argument(format!(
                "Curried function still expects {} more argument(s)",
                rest.remaining()
            ))),
        }
    }

    /// Turn the curry into a zero-argument handler.
    pub fn into_handler(self) -> HandlerFn {
        Arc::new(move || self.complete_with(std::iter::empty()))
    }

    /// Turn the curry into a post-processor that supplies the decorated
    /// handler's output as the final argument.
    pub fn into_post_process(self) -> PostProcessFn {
        Arc::new(move |value: Value| self.complete_with([value]))
    }
}

impl fmt::Debug for Curry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curry")
            .field("arity", &self.arity)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
