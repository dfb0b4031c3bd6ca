//! Query parameter bags
//!
//! Parameters keep insertion order and overwrite on repeated keys. Null
//! values are never put on the wire.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Which values count as "empty" when filtering a search bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyValuePolicy {
    /// Drop null and empty strings, keep `0` and `false`
    DropEmpty,
    /// Drop anything falsy: null, empty strings, `0`, `false`
    DropFalsy,
}

impl EmptyValuePolicy {
    fn keeps(self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Bool(b) => *b || self == Self::DropEmpty,
            Value::Number(n) => {
                self == Self::DropEmpty || n.as_f64().map(|f| f != 0.0).unwrap_or(true)
            }
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Ordered query parameter bag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset/limit paging bag used by the list endpoints
    pub fn paging(offset: u64, limit: u64) -> Self {
        Self::new()
            .with("paging", true)
            .with("offset", offset)
            .with("limit", limit)
    }

    /// Offset/limit bag without the `paging` flag
    pub fn window(offset: u64, limit: u64) -> Self {
        Self::new().with("offset", offset).with("limit", limit)
    }

    /// Build from any record that serializes to a JSON object
    pub fn from_record<T: Serialize>(record: &T) -> ClientResult<Self> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(ClientError::Request(format!(
                "query parameters must be an object, got {}",
                other
            ))),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Merge another bag, letting its values win
    pub fn merge(mut self, other: QueryParams) -> Self {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
        self
    }

    /// Merge only the entries of `other` that survive `policy`
    pub fn merge_filtered(self, other: QueryParams, policy: EmptyValuePolicy) -> Self {
        self.merge(other.filter_empty(policy))
    }

    /// Drop entries that `policy` counts as empty
    pub fn filter_empty(mut self, policy: EmptyValuePolicy) -> Self {
        self.entries.retain(|(_, value)| policy.keeps(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into wire pairs.
    ///
    /// Nulls are skipped and arrays become repeated `key[]` pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    let array_key = format!("{}[]", key);
                    pairs.extend(
                        items
                            .iter()
                            .filter(|item| !item.is_null())
                            .map(|item| (array_key.clone(), scalar_to_string(item))),
                    );
                }
                other => pairs.push((key.clone(), scalar_to_string(other))),
            }
        }
        pairs
    }

    /// Parameters as a JSON object, mostly for logging
    pub fn to_json(&self) -> Value {
        Value::Object(self.entries.iter().cloned().collect::<Map<_, _>>())
    }
}

impl FromIterator<(String, Value)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paging_bag_order() {
        let pairs = QueryParams::paging(20, 10).to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("paging".to_string(), "true".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_drop_empty_keeps_zero_and_false() {
        let params = QueryParams::new()
            .with("keyword", "")
            .with("difficulty", Value::Null)
            .with("contest_id", 0)
            .with("visible", false)
            .with("tag", "dp")
            .filter_empty(EmptyValuePolicy::DropEmpty);

        assert!(params.get("keyword").is_none());
        assert!(params.get("difficulty").is_none());
        assert_eq!(params.get("contest_id"), Some(&json!(0)));
        assert_eq!(params.get("visible"), Some(&json!(false)));
        assert_eq!(params.get("tag"), Some(&json!("dp")));
    }

    #[test]
    fn test_drop_falsy() {
        let params = QueryParams::new()
            .with("keyword", "")
            .with("page", 0)
            .with("myself", false)
            .with("tag", "graph")
            .filter_empty(EmptyValuePolicy::DropFalsy);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("tag"), Some(&json!("graph")));
    }

    #[test]
    fn test_insert_overwrites() {
        let params = QueryParams::window(0, 10).with("offset", 30);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("offset"), Some(&json!(30)));
    }

    #[test]
    fn test_arrays_and_nulls_on_the_wire() {
        let pairs = QueryParams::new()
            .with("id", json!([1, 2]))
            .with("username", Value::Null)
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("id[]".to_string(), "1".to_string()),
                ("id[]".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_record() {
        #[derive(Serialize)]
        struct Query {
            contest_id: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            keyword: Option<String>,
        }
        let params = QueryParams::from_record(&Query {
            contest_id: 3,
            keyword: None,
        })
        .unwrap();
        assert_eq!(params.to_pairs(), vec![("contest_id".to_string(), "3".to_string())]);

        assert!(QueryParams::from_record(&42).is_err());
    }
}
