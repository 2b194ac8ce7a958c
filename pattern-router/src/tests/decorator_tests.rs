//! Property-based tests for decoration

use crate::{decorator, handler, post_process, PostProcessFn, Router, Target};
use proptest::prelude::*;
use serde_json::{json, Value};

fn append(tail: String) -> PostProcessFn {
    post_process(move |v| match v {
        Value::String(s) => Value::String(format!("{}{}", s, tail)),
        other => other,
    })
}

fn uppercase() -> PostProcessFn {
    post_process(|v| match v {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Stacked decorators apply innermost first.
    #[test]
    fn prop_decorators_apply_in_nesting_order(
        base in "[a-z]{1,8}",
        tails in proptest::collection::vec("[a-z]{1,4}", 1..6),
    ) {
        let router = Router::new();
        let body = base.clone();
        let route = router.add("/", handler(move || body.clone())).unwrap().to_route().unwrap();

        let mut target: Target = route.into();
        for tail in &tails {
            target = decorator(append(format!("-{}", tail)), target).unwrap();
        }

        let expected = tails.iter().fold(base, |acc, tail| format!("{}-{}", acc, tail));
        prop_assert_eq!(target.invoke().unwrap(), Value::String(expected));
    }
}

#[test]
fn test_decorating_copy_leaves_registered_route_alone() {
    let router = Router::new();
    router.add("/?json", handler(|| "say hello")).unwrap();

    let copy = router.find_route("/?json").unwrap().to_route().unwrap();
    router
        .controller("/?json_ucase", decorator(uppercase(), copy).unwrap())
        .unwrap();

    assert_eq!(router.call("/json").unwrap(), Some(json!("say hello")));
    assert_eq!(router.call("/json_ucase").unwrap(), Some(json!("SAY HELLO")));
}

#[test]
fn test_decorating_handle_changes_dispatch() {
    let router = Router::new();
    router.add("/", handler(|| "home")).unwrap();

    decorator(uppercase(), router.find_route("/").unwrap()).unwrap();

    assert_eq!(router.call("/").unwrap(), Some(json!("HOME")));
}

#[test]
fn test_controller_snapshots_registered_handler() {
    let router = Router::new();
    let source = router.add("/?source", handler(|| "source")).unwrap();
    router.controller("/?alias", source.clone()).unwrap();

    // Later decoration of the source does not reach the alias
    decorator(uppercase(), source).unwrap();

    assert_eq!(router.call("/source").unwrap(), Some(json!("SOURCE")));
    assert_eq!(router.call("/alias").unwrap(), Some(json!("source")));
}
