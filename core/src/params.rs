//! Multi-valued parameter set used for query strings and form bodies.
//!
//! # Design
//! Keys live in a `BTreeMap`, so encoding walks them in sorted order without
//! an extra sort step and the output is a pure function of the contents.
//! Each key keeps its values in insertion order; repeated values are emitted
//! as repeated `key=value` pairs.

use std::collections::BTreeMap;

/// Ordered, multi-valued string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), vec![value.into()]);
        self
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// First value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Encode as `k1=v1&k1=v2&k2=v3` with keys sorted.
    ///
    /// Escaping follows query component rules: ASCII alphanumerics and
    /// `-_.~` pass through, space becomes `+`, every other byte is `%XX`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.values {
            let key = escape(key);
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key);
                out.push('=');
                out.push_str(&escape(value));
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

fn escape(input: &str) -> String {
    urlencoding::encode(input).replace("%20", "+")
}

/// Render `params` as a query suffix: `""` when empty, `?<encoded>` otherwise.
pub fn format_query(params: &Params) -> String {
    if params.is_empty() {
        return String::new();
    }
    format!("?{}", params.encode())
}
