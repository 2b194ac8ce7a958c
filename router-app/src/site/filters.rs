//! Stock post-processors
//!
//! Each filter leaves values it does not understand unchanged, so they can be
//! stacked over arbitrary handlers.

use pattern_router::{
    curry, post_process, try_post_process, Curry, PostProcessFn, RouteError, RouteResult,
};
use regex::{NoExpand, RegexBuilder};
use serde_json::Value;

/// Encode the value as a JSON string.
pub fn json_encode() -> PostProcessFn {
    try_post_process(|value| Ok(Value::String(serde_json::to_string(&value)?)))
}

/// Uppercase string values.
pub fn uppercase() -> PostProcessFn {
    map_strings(str::to_uppercase)
}

/// Lowercase string values.
pub fn lowercase() -> PostProcessFn {
    map_strings(str::to_lowercase)
}

fn map_strings(f: fn(&str) -> String) -> PostProcessFn {
    post_process(move |value| match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    })
}

/// Case-insensitive replace curried over `search` and `replace`.
///
/// The resulting curry needs one more argument, the subject, which makes it
/// usable as a post-processor via [`Curry::into_post_process`].
///
/// `search` and `replace` may each be a string or an array of strings. With a
/// search array, the n-th search term is replaced by the n-th replacement, or
/// by the empty string when the replacements run out; a single replacement
/// string applies to every term. Arrays of subjects are replaced element-wise.
pub fn replace_ci(search: Value, replace: Value) -> RouteResult<Curry> {
    curry(
        |args: &[Value]| match args {
            [search, replace, subject] => replace_in(search, replace, subject),
            _ => Err(RouteError::invalid_argument("replace_ci takes three arguments")),
        },
        3,
        [search, replace],
    )
}

fn replace_in(search: &Value, replace: &Value, subject: &Value) -> RouteResult<Value> {
    let searches = string_list(search, "search")?;
    let replacements: Vec<String> = match replace {
        Value::String(s) => vec![s.clone(); searches.len()],
        other => string_list(other, "replace")?,
    };

    let pairs = searches.iter().enumerate().map(|(i, term)| {
        let with = replacements.get(i).map(String::as_str).unwrap_or("");
        (term.as_str(), with)
    });

    let mut rules = Vec::with_capacity(searches.len());
    for (term, with) in pairs {
        if term.is_empty() {
            continue;
        }
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        rules.push((pattern, with));
    }

    Ok(apply_rules(subject, &rules))
}

fn apply_rules(subject: &Value, rules: &[(regex::Regex, &str)]) -> Value {
    match subject {
        Value::String(s) => {
            let mut text = s.clone();
            for (pattern, with) in rules {
                text = pattern.replace_all(&text, NoExpand(with)).into_owned();
            }
            Value::String(text)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| apply_rules(item, rules)).collect())
        }
        other => other.clone(),
    }
}

fn string_list(value: &Value, name: &str) -> RouteResult<Vec<String>> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    RouteError::invalid_argument(format!("{} terms must be strings", name))
                })
            })
            .collect(),
        _ => Err(RouteError::invalid_argument(format!(
            "{} must be a string or an array of strings",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_encode() {
        let encode = json_encode();
        assert_eq!(encode(json!(["a", 1])).unwrap(), json!(r#"["a",1]"#));
        assert_eq!(encode(json!("x")).unwrap(), json!(r#""x""#));
    }

    #[test]
    fn test_case_filters_skip_non_strings() {
        assert_eq!(uppercase()(json!("Hi")).unwrap(), json!("HI"));
        assert_eq!(lowercase()(json!("Hi")).unwrap(), json!("hi"));
        assert_eq!(uppercase()(json!(3)).unwrap(), json!(3));
    }

    #[test]
    fn test_replace_ci_pairs_terms() {
        let replace = replace_ci(json!(["hello", "json"]), json!(["GOODBYE", "PHP"]))
            .unwrap()
            .into_post_process();
        assert_eq!(
            replace(json!("Say HELLO to Json")).unwrap(),
            json!("Say GOODBYE to PHP")
        );
    }

    #[test]
    fn test_replace_ci_short_replacements_use_empty() {
        let c = replace_ci(json!(["a", "b"]), json!(["x"])).unwrap();
        assert_eq!(c.complete_with([json!("AaBb")]).unwrap(), json!("xx"));
    }

    #[test]
    fn test_replace_ci_single_replacement_and_literal_terms() {
        let c = replace_ci(json!(["a.", "b"]), json!("-")).unwrap();
        assert_eq!(c.complete_with([json!("A.ab$1")]).unwrap(), json!("-a-$1"));
    }

    #[test]
    fn test_replace_ci_array_subject() {
        let c = replace_ci(json!("x"), json!("y")).unwrap();
        assert_eq!(
            c.complete_with([json!(["X", "ax", 1])]).unwrap(),
            json!(["y", "ay", 1])
        );
    }

    #[test]
    fn test_replace_ci_rejects_bad_terms() {
        let c = replace_ci(json!(1), json!("y")).unwrap();
        assert!(c.complete_with([json!("x")]).is_err());
    }
}
