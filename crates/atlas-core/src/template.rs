//! Template generation for new entity instances
//!
//! Builds the starting frontmatter for a note of a given type. The generated
//! metadata satisfies the schema's own `requiredProperties` and
//! `propertyValues` criteria, so a note created from it is recognized on the
//! next scan (folder, tag and name criteria depend on where the note is saved).

use crate::error::{AtlasError, Result};
use crate::properties::{PropertyMap, PropertyValue};
use crate::schema::EntitySchema;

/// Default-value synthesis for schemas
pub struct EntityTemplate;

impl EntityTemplate {
    /// Scaffolding metadata for `schema`
    ///
    /// Fill order: schema properties (default value or the kind's zero value),
    /// then missing criteria-required keys as empty strings, then expected
    /// property values (the first option of an OR-list), which override
    /// anything filled before them.
    pub fn for_schema(schema: &EntitySchema) -> PropertyMap {
        let mut template = PropertyMap::new();

        for (name, definition) in &schema.properties {
            let value = definition
                .default_value
                .clone()
                .unwrap_or_else(|| definition.kind.zero_value());
            template.insert(name.clone(), value);
        }

        for name in &schema.match_criteria.required_properties {
            template
                .entry(name.clone())
                .or_insert_with(|| PropertyValue::String(String::new()));
        }

        for (name, expected) in &schema.match_criteria.property_values {
            let value = match expected {
                PropertyValue::List(options) => match options.first() {
                    Some(first) => first.clone(),
                    None => continue,
                },
                other => other.clone(),
            };
            template.insert(name.clone(), value);
        }

        template
    }
}

/// Render metadata as a YAML frontmatter block
pub fn render_frontmatter(metadata: &PropertyMap) -> Result<String> {
    if metadata.is_empty() {
        return Ok("---\n---\n".to_string());
    }
    let yaml = serde_yaml::to_string(metadata).map_err(|e| AtlasError::Render(e.to_string()))?;
    Ok(format!("---\n{}---\n", yaml))
}
