//! Metadata value model
//!
//! Frontmatter values are heterogeneous at the source. This module models them as a
//! tagged variant so the comparator can stay generic over one closed type:
//!
//! - `Null` - an explicit `null` / `~` in the frontmatter
//! - `Bool`, `Number`, `String` - scalars (all numbers are `f64`)
//! - `List`, `Map` - structured values
//!
//! A key that is missing from the metadata is *absent*, which is modelled as
//! `Option::None` at call sites and is distinct from `Null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Insertion-ordered metadata mapping for a single note
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A single metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(PropertyMap),
}

impl PropertyValue {
    /// True for `Bool`, `Number` and `String`
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::String(_))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            // Integral floats print without the trailing ".0", as frontmatter authors wrote them
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<serde_yaml::Value> for PropertyValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(k), Self::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Stringify a YAML mapping key; frontmatter keys are almost always strings
/// but `1: foo` or `true: bar` are legal YAML.
pub(crate) fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => PropertyValue::from(other).to_string(),
    }
}

/// Convert a YAML mapping into a `PropertyMap`
pub fn property_map_from_yaml(mapping: serde_yaml::Mapping) -> PropertyMap {
    mapping
        .into_iter()
        .map(|(k, v)| (yaml_key_to_string(k), PropertyValue::from(v)))
        .collect()
}

/// Convert a JSON object into a `PropertyMap`
pub fn property_map_from_json(object: serde_json::Map<String, serde_json::Value>) -> PropertyMap {
    object
        .into_iter()
        .map(|(k, v)| (k, PropertyValue::from(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(PropertyValue::from(json!(null)), PropertyValue::Null);
        assert_eq!(PropertyValue::from(json!(true)), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::from(json!(42)), PropertyValue::Number(42.0));
        assert_eq!(
            PropertyValue::from(json!("type/person")),
            PropertyValue::String("type/person".to_string())
        );
    }

    #[test]
    fn test_from_json_preserves_object_order() {
        let value = PropertyValue::from(json!({"zeta": 1, "alpha": 2}));
        let PropertyValue::Map(map) = value else {
            panic!("expected map");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_from_yaml_mapping_and_sequence() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("name: Ada\ntags:\n  - person\n  - math\nborn: 1815\n").unwrap();
        let serde_yaml::Value::Mapping(mapping) = yaml else {
            panic!("expected mapping");
        };
        let map = property_map_from_yaml(mapping);

        assert_eq!(map.get("name"), Some(&PropertyValue::from("Ada")));
        assert_eq!(
            map.get("tags"),
            Some(&PropertyValue::from(vec!["person", "math"]))
        );
        assert_eq!(map.get("born"), Some(&PropertyValue::Number(1815.0)));
    }

    #[test]
    fn test_yaml_non_string_keys_are_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let serde_yaml::Value::Mapping(mapping) = yaml else {
            panic!("expected mapping");
        };
        let map = property_map_from_yaml(mapping);
        assert!(map.contains_key("1"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Number(3.0).to_string(), "3");
        assert_eq!(PropertyValue::Number(2.5).to_string(), "2.5");
        assert_eq!(PropertyValue::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(PropertyValue::Null.to_string(), "null");
    }

    #[test]
    fn test_untagged_json_round_trip() {
        let original = PropertyValue::from(json!({"is": "[[type/person]]", "age": 36, "tags": ["x"]}));
        let text = serde_json::to_string(&original).unwrap();
        let back: PropertyValue = serde_json::from_str(&text).unwrap();
        assert_eq!(original, back);
    }
}
