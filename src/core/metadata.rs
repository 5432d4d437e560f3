//! Free-form metadata attached to a log entry
//!
//! Values are opaque to the sink: anything `Serialize` is accepted and
//! stored as a `serde_json::Value`. Keys are kept sorted so console output
//! is stable between runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Render an opaque payload for display: strings verbatim, everything else as compact JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert any serializable value into an opaque payload
///
/// Serialization failures degrade to a string describing the failure
/// instead of bubbling up, since building an entry cannot fail.
pub(crate) fn to_payload<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("<unserializable: {}>", e)))
}

/// Key-value metadata for a single entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, Value>,
}

impl Metadata {
    /// Create an empty mapping
    ///
    /// An empty mapping is still rendered on the console (as an empty
    /// "More Info" segment); use `None` on the entry for "no extra info".
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the mapping
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        self.insert(key, value);
        self
    }

    /// Add a field to the mapping (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Serialize,
    {
        self.fields.insert(key.into(), to_payload(&value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, display_value(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Serialize,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_creation() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());
        assert_eq!(metadata.to_string(), "");
    }

    #[test]
    fn test_metadata_with_fields() {
        let metadata = Metadata::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata.get("user_id"), Some(&Value::from(123)));
    }

    #[test]
    fn test_metadata_format_is_sorted() {
        let metadata: Metadata = [("test2", "test2"), ("test", "test")].into_iter().collect();
        assert_eq!(metadata.format_fields(), "test=test test2=test2");
    }

    #[test]
    fn test_metadata_nested_values() {
        let metadata = Metadata::new().with_field("ids", vec![1, 2, 3]);
        assert_eq!(metadata.format_fields(), "ids=[1,2,3]");
    }
}
