//! Ordered request parameters with Kalshi's falsy-omission rule.
//!
//! Every listing endpoint and the order-creation body drop parameters whose
//! value is falsy: the empty string, zero, `false` or an absent value. This
//! mirrors what the exchange clients in the wild send, so an explicit `0`
//! or `false` filter never reaches the server. Callers that need to send
//! such a value must build the path themselves.

use serde_json::{Map, Value};

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl ParamValue {
    /// Values that are omitted from query strings and bodies
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(n) => *n == 0,
            Self::Bool(b) => !b,
            Self::Null => true,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => String::new(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Int(n) => Value::from(*n),
            Self::Bool(b) => Value::Bool(*b),
            Self::Null => Value::Null,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for ParamValue {
    /// Values past `i64::MAX` are kept exact as strings
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered parameter map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, keeping the position of an existing key
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter in place
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that survive the falsy-omission rule, in insertion order
    pub fn retained(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_falsy())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Render as `?k1=v1&k2=v2`, or an empty string when nothing survives.
    ///
    /// Values are written verbatim, without percent-encoding.
    pub fn to_query_string(&self) -> String {
        let query = self
            .retained()
            .map(|(k, v)| format!("{}={}", k, v.render()))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            query
        } else {
            format!("?{}", query)
        }
    }

    /// Append the rendered query to `path`, joining with `&` when the path
    /// already carries a query string
    pub fn append_to(&self, path: &str) -> String {
        let query = self.to_query_string();
        match query.strip_prefix('?') {
            None => path.to_string(),
            Some(rest) if path.contains('?') => format!("{}&{}", path, rest),
            Some(_) => format!("{}{}", path, query),
        }
    }

    /// Render as a JSON object body under the same omission rule
    pub fn to_json_body(&self) -> Value {
        let body: Map<String, Value> = self
            .retained()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        Value::Object(body)
    }
}

/// Drop everything from the first `?` onward
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(head, _)| head)
}
