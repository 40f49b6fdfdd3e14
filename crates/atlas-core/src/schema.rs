//! Entity schema definitions
//!
//! Schemas are plain data deserialized from the schema document. The JSON
//! shape uses camelCase keys and `type` for the property kind:
//!
//! ```json
//! {
//!   "name": "Person",
//!   "properties": { "name": { "type": "string", "required": true } },
//!   "matchCriteria": { "folderPath": "people", "propertyValues": { "is": "[[type/person]]" } }
//! }
//! ```
//!
//! Schema order in a sequence is significant: the scanner commits to the first
//! schema that matches a file.

use crate::properties::PropertyValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value kind declared for a schema property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyKind {
    /// All kinds, in declaration order
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::String,
        PropertyKind::Number,
        PropertyKind::Boolean,
        PropertyKind::Array,
        PropertyKind::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Parse the lower-case JSON name of a kind
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// The empty value used when scaffolding a property without a default
    pub fn zero_value(&self) -> PropertyValue {
        match self {
            Self::String => PropertyValue::String(String::new()),
            Self::Number => PropertyValue::Number(0.0),
            Self::Boolean => PropertyValue::Bool(false),
            Self::Array => PropertyValue::List(Vec::new()),
            Self::Object => PropertyValue::Map(Default::default()),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single schema property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyDefinition {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            required: false,
            default_value: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Conjunctive predicate over a file and its metadata
///
/// Every sub-criterion is optional; an absent one always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    /// Keys that must exist in the metadata, whatever their value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_properties: Vec<String>,
    /// Prefix the file path must start with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    /// Substring at least one tag must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_pattern: Option<String>,
    /// Substring the file basename must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    /// Expected values, each a scalar or a list of acceptable scalars
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub property_values: IndexMap<String, PropertyValue>,
}

/// A named entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDefinition>,
    #[serde(default)]
    pub match_criteria: MatchCriteria,
}

impl EntitySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: IndexMap::new(),
            match_criteria: MatchCriteria::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, definition: PropertyDefinition) -> Self {
        self.properties.insert(name.into(), definition);
        self
    }

    pub fn with_criteria(mut self, criteria: MatchCriteria) -> Self {
        self.match_criteria = criteria;
        self
    }

    /// Names of properties marked required, in declaration order
    pub fn required_property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name.as_str())
    }
}

impl MatchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_properties
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn in_folder(mut self, prefix: impl Into<String>) -> Self {
        self.folder_path = Some(prefix.into());
        self
    }

    pub fn tagged(mut self, pattern: impl Into<String>) -> Self {
        self.tag_pattern = Some(pattern.into());
        self
    }

    pub fn named(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, expected: impl Into<PropertyValue>) -> Self {
        self.property_values.insert(key.into(), expected.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_document_shape() {
        let value = json!({
            "name": "Person",
            "description": "A human",
            "properties": {
                "name": { "type": "string", "required": true },
                "email": { "type": "string", "required": false, "defaultValue": "" },
                "age": { "type": "number" }
            },
            "matchCriteria": {
                "requiredProperties": ["name", "is"],
                "folderPath": "people",
                "propertyValues": { "is": ["[[type/person]]", "person"] }
            }
        });

        let schema: EntitySchema = serde_json::from_value(value).unwrap();
        assert_eq!(schema.name, "Person");
        assert_eq!(schema.properties.len(), 3);
        assert_eq!(schema.properties["age"].kind, PropertyKind::Number);
        assert!(!schema.properties["age"].required);
        assert_eq!(
            schema.properties["email"].default_value,
            Some(PropertyValue::from(""))
        );
        assert_eq!(schema.match_criteria.folder_path.as_deref(), Some("people"));
        assert!(schema.match_criteria.tag_pattern.is_none());
        assert_eq!(
            schema.match_criteria.property_values["is"],
            PropertyValue::from(vec!["[[type/person]]", "person"])
        );
    }

    #[test]
    fn test_serialize_uses_camel_case_and_type_key() {
        let schema = EntitySchema::new("Project")
            .with_property("status", PropertyDefinition::new(PropertyKind::String).required())
            .with_criteria(MatchCriteria::new().require(["status"]).in_folder("projects"));

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["properties"]["status"]["type"], json!("string"));
        assert_eq!(value["matchCriteria"]["requiredProperties"], json!(["status"]));
        assert_eq!(value["matchCriteria"]["folderPath"], json!("projects"));
        assert!(value["matchCriteria"].get("tagPattern").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let schema = EntitySchema::new("Meeting")
            .with_description("A dated meeting note")
            .with_property(
                "date",
                PropertyDefinition::new(PropertyKind::String)
                    .required()
                    .with_description("ISO date"),
            )
            .with_property("attendees", PropertyDefinition::new(PropertyKind::Array))
            .with_criteria(
                MatchCriteria::new()
                    .tagged("meeting")
                    .named("Meeting")
                    .with_value("draft", false),
            );

        let text = serde_json::to_string_pretty(&schema).unwrap();
        let back: EntitySchema = serde_json::from_str(&text).unwrap();
        assert_eq!(schema, back);
    }

    #[test]
    fn test_required_property_names_in_order() {
        let schema = EntitySchema::new("Person")
            .with_property("email", PropertyDefinition::new(PropertyKind::String))
            .with_property("name", PropertyDefinition::new(PropertyKind::String).required())
            .with_property("is", PropertyDefinition::new(PropertyKind::String).required());

        let names: Vec<&str> = schema.required_property_names().collect();
        assert_eq!(names, vec!["name", "is"]);
    }

    #[test]
    fn test_kind_parse_and_zero_values() {
        assert_eq!(PropertyKind::parse("boolean"), Some(PropertyKind::Boolean));
        assert_eq!(PropertyKind::parse("Boolean"), None);
        assert_eq!(PropertyKind::Number.zero_value(), PropertyValue::Number(0.0));
        assert_eq!(PropertyKind::Array.zero_value(), PropertyValue::List(vec![]));
    }
}
