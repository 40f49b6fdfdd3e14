//! Missing-field analysis
//!
//! Lists the fields a matched note still lacks. Presence is key existence:
//! an empty string, `false` or `null` value still counts as present.

use crate::properties::PropertyMap;
use crate::schema::EntitySchema;

/// Required fields of `schema` absent from `metadata`
///
/// Required schema properties come first in declaration order, followed by
/// match-criteria required properties not already listed. No name appears twice.
pub fn missing_fields(metadata: &PropertyMap, schema: &EntitySchema) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();

    let candidates = schema.required_property_names().chain(
        schema
            .match_criteria
            .required_properties
            .iter()
            .map(String::as_str),
    );

    for name in candidates {
        if !metadata.contains_key(name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyValue;
    use crate::schema::{MatchCriteria, PropertyDefinition, PropertyKind};

    fn person() -> EntitySchema {
        EntitySchema::new("Person")
            .with_property("email", PropertyDefinition::new(PropertyKind::String))
            .with_property("name", PropertyDefinition::new(PropertyKind::String).required())
            .with_criteria(MatchCriteria::new().require(["name", "is"]))
    }

    fn meta(pairs: &[(&str, PropertyValue)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_union_of_properties_and_criteria() {
        let missing = missing_fields(&meta(&[("is", "x".into())]), &person());
        assert_eq!(missing, vec!["name"]);
    }

    #[test]
    fn test_deduplicates_and_orders_properties_first() {
        let schema = EntitySchema::new("Project")
            .with_property("owner", PropertyDefinition::new(PropertyKind::String).required())
            .with_property("status", PropertyDefinition::new(PropertyKind::String).required())
            .with_criteria(MatchCriteria::new().require(["kind", "status", "kind"]));

        let missing = missing_fields(&PropertyMap::new(), &schema);
        assert_eq!(missing, vec!["owner", "status", "kind"]);
    }

    #[test]
    fn test_falsy_values_count_as_present() {
        let metadata = meta(&[
            ("name", "".into()),
            ("is", PropertyValue::Null),
            ("email", false.into()),
        ]);
        assert!(missing_fields(&metadata, &person()).is_empty());
    }

    #[test]
    fn test_optional_properties_never_reported() {
        let schema = EntitySchema::new("Loose")
            .with_property("note", PropertyDefinition::new(PropertyKind::String));
        assert!(missing_fields(&PropertyMap::new(), &schema).is_empty());
    }
}
