//! Request parameter sources
//!
//! The dispatch entry point reads the path to route from a key-value source
//! rather than from ambient process state, so a router can be driven from a
//! query string, a CGI environment or a test map alike.

use std::collections::HashMap;

/// Read-only lookup of request parameters by key.
pub trait RequestParams {
    /// Get a parameter value, if present.
    fn get(&self, key: &str) -> Option<&str>;

    /// Get a parameter value, falling back to `default` when absent.
    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

impl RequestParams for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

/// Parameters decoded from an `application/x-www-form-urlencoded` query string.
///
/// When a key repeats, the last occurrence wins.
///
/// # Example
/// ```rust,ignore
/// let params = QueryParams::parse("url=%2F%3Fjson&lang=en");
/// assert_eq!(params.get("url"), Some("/?json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let values = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { values }
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl RequestParams for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
