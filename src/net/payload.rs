//! Report payloads and their wire encodings.

use url::form_urlencoded;

use crate::metrics::MetricsRecord;

/// Key used for the slow resource report.
pub const TIMEOUT_RES_KEY: &str = "timeoutRes";

/// A single payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// String form used by both encodings.
    ///
    /// Numbers print the way page scripts print them (`1500`, `12.5`,
    /// `NaN`, `Infinity`) and lists join with commas.
    pub fn to_wire_string(&self) -> String {
        match self {
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(","),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Ordered key/value mapping sent to a collector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Keys are kept in insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `(key, string value)` pairs, one per multipart field.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_wire_string()))
            .collect()
    }

    /// `k1=v1&k2=v2`, form-urlencoded.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            serializer.append_pair(k, &v.to_wire_string());
        }
        serializer.finish()
    }

    /// The slow resource report body.
    pub fn timeout_report(names: Vec<String>) -> Self {
        Self::new().with(TIMEOUT_RES_KEY, names)
    }
}

impl From<&MetricsRecord> for Payload {
    fn from(m: &MetricsRecord) -> Self {
        m.entries()
            .into_iter()
            .fold(Payload::new(), |p, (k, v)| p.with(k, v))
    }
}

/// Append the payload to `url` as a query string.
pub fn url_with_query(url: &str, payload: &Payload) -> String {
    if payload.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, sep, payload.to_query_string())
}
