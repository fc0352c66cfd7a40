//! Form encoding for payment API parameters.
//!
//! The payment API takes `application/x-www-form-urlencoded` parameters with
//! bracketed keys for nesting: `metadata[plan]=gold`, `items[0][plan]=gold`.
//! [`FormValues`] holds such pairs in insertion order, and
//! [`FormValues::from_serialize`] flattens any serializable params struct into
//! them.

use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::InvalidRequestError;

/// An ordered list of form key/value pairs.
///
/// Keys may repeat (via [`append`](Self::append)); order is preserved so the
/// encoded output is deterministic.
///
/// # Example
///
/// ```rust
/// use payment_portal::clients::FormValues;
/// use serde_json::json;
///
/// let form = FormValues::from_value(&json!({
///     "name": "Gold plan",
///     "metadata": {"tier": "gold"},
///     "expand": ["product"],
/// }))
/// .unwrap();
///
/// assert_eq!(form.get("metadata[tier]"), Some("gold"));
/// assert_eq!(form.get("expand[0]"), Some("product"));
/// assert_eq!(form.get("name"), Some("Gold plan"));
///
/// let mut single = FormValues::new();
/// single.set("metadata[tier]", "gold");
/// assert_eq!(single.encode(), "metadata%5Btier%5D=gold");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    /// Creates an empty set of values.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Flattens a serializable value into form pairs.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::UnencodableParams`] if the value fails to
    /// serialize or its root is not a map.
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> Result<Self, InvalidRequestError> {
        let value =
            serde_json::to_value(params).map_err(|e| InvalidRequestError::UnencodableParams {
                reason: e.to_string(),
            })?;
        Self::from_value(&value)
    }

    /// Flattens a JSON value into form pairs.
    ///
    /// `null` at the root is treated as "no parameters".
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::UnencodableParams`] if the root is
    /// neither an object nor `null`.
    pub fn from_value(value: &Value) -> Result<Self, InvalidRequestError> {
        let mut form = Self::new();
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, child) in map {
                    form.flatten(key.clone(), child);
                }
            }
            other => {
                return Err(InvalidRequestError::UnencodableParams {
                    reason: format!("expected a map of parameters, got {}", kind(other)),
                })
            }
        }
        Ok(form)
    }

    fn flatten(&mut self, key: String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Bool(b) => self.append(key, b.to_string()),
            Value::Number(n) => self.append(key, n.to_string()),
            Value::String(s) => self.append(key, s.clone()),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.flatten(format!("{key}[{i}]"), item);
                }
            }
            Value::Object(map) => {
                for (child_key, child) in map {
                    self.flatten(format!("{key}[{child_key}]"), child);
                }
            }
        }
    }

    /// Replaces every value for `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.remove(&key);
        self.pairs.push((key, value.into()));
    }

    /// Adds a value for `key`, keeping any existing values.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes every value for `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Percent-encodes the pairs as `k=v&k=v`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
