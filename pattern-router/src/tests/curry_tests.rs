//! Property-based tests for partial application

use crate::{curry, decorator, handler, Applied, RouteErrorCode, RouteResult, Router};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn sum(args: &[Value]) -> RouteResult<Value> {
    Ok(json!(args.iter().filter_map(Value::as_i64).sum::<i64>()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// However the arguments are split, the target runs exactly once and only
    /// when the last argument arrives.
    #[test]
    fn prop_target_runs_once_on_completion(
        values in proptest::collection::vec(-1000i64..1000, 1..8),
        split_seed in any::<u64>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let arity = values.len();

        let first = 1 + (split_seed as usize) % arity;
        let mut current = curry(
            move |args: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                sum(args)
            },
            arity,
            values[..first].iter().map(|v| json!(v)),
        )
        .unwrap();

        let mut result = None;
        if first == arity {
            result = current.call().unwrap().complete();
        } else {
            for (offset, value) in values[first..].iter().enumerate() {
                prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
                match current.apply([json!(value)]).unwrap() {
                    Applied::Partial(next) => {
                        prop_assert_eq!(next.remaining(), arity - first - offset - 1);
                        current = next;
                    }
                    Applied::Complete(value) => result = Some(value),
                }
            }
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        prop_assert_eq!(result, Some(json!(values.iter().sum::<i64>())));
    }

    /// Supplying more arguments than the arity is always rejected.
    #[test]
    fn prop_excess_arguments_rejected(arity in 1usize..6, extra in 1usize..4) {
        let c = curry(sum, arity, [json!(1)]).unwrap();
        let err = c.apply((0..arity - 1 + extra).map(|n| json!(n))).unwrap_err();
        prop_assert_eq!(err.code, RouteErrorCode::InvalidArgument);
    }
}

#[test]
fn test_add3_example() {
    let add3 = curry(sum, 3, [json!(1)]).unwrap();
    let add2 = add3.apply([json!(2)]).unwrap().partial().unwrap();
    assert_eq!(add2.apply([json!(3)]).unwrap().complete(), Some(json!(6)));

    // The original curry is reusable
    let other = add3.apply([json!(10), json!(20)]).unwrap().complete();
    assert_eq!(other, Some(json!(31)));
}

#[test]
fn test_curry_as_route_post_processor() {
    let router = Router::new();
    router.add("/?greeting", handler(|| "hello world")).unwrap();

    let replace = curry(
        |args: &[Value]| {
            let (search, replace, subject) = match args {
                [Value::String(a), Value::String(b), Value::String(c)] => (a, b, c),
                _ => return Ok(Value::Null),
            };
            Ok(Value::String(subject.replace(search.as_str(), replace)))
        },
        3,
        [json!("world"), json!("there")],
    )
    .unwrap();

    let copy = router.find_route("/?greeting").unwrap().to_route().unwrap();
    router
        .controller("/?greeting_there", decorator(replace.into_post_process(), copy).unwrap())
        .unwrap();

    assert_eq!(router.call("/greeting").unwrap(), Some(json!("hello world")));
    assert_eq!(router.call("/greeting_there").unwrap(), Some(json!("hello there")));
}

#[test]
fn test_complete_curry_dispatches_as_route_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let sum_once = curry(
        move |args: &[Value]| {
            counter.fetch_add(1, Ordering::SeqCst);
            sum(args)
        },
        2,
        [json!(1), json!(2)],
    )
    .unwrap();

    let router = Router::new();
    router.add("/?sum", sum_once.into_handler()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(router.call("/sum").unwrap(), Some(json!(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let mut out = Vec::new();
    assert!(router.dispatch("sum", &mut out).unwrap());
    assert_eq!(out, b"3");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
