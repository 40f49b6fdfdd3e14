//! Schema document storage
//!
//! The schema document is a JSON array of [`EntitySchema`] objects, in
//! priority order. Documents are checked structurally before they are
//! deserialized so that every problem is reported at once, with the position
//! and name of the offending schema.

use crate::defaults::default_schemas;
use crate::error::{ConfigError, ConfigResult, SchemaIssue};
use atlas_core::{EntitySchema, PropertyKind};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Check the shape of a schema document
///
/// Returns every issue found; an empty list means the document can be
/// deserialized into schemas.
pub fn validate_schema_document(document: &Value) -> Vec<SchemaIssue> {
    let Some(entries) = document.as_array() else {
        return vec![SchemaIssue::document(
            "schema document must be a JSON array",
        )];
    };

    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(schema) = entry.as_object() else {
            issues.push(SchemaIssue::at(index, None, "schema must be an object"));
            continue;
        };

        let name = match schema.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name.as_str()),
            Some(Value::String(_)) => {
                issues.push(SchemaIssue::at(index, None, "name must not be empty"));
                None
            }
            Some(_) => {
                issues.push(SchemaIssue::at(index, None, "name must be a string"));
                None
            }
            None => {
                issues.push(SchemaIssue::at(index, None, "name is required"));
                None
            }
        };

        if let Some(name) = name {
            if !seen.insert(name) {
                issues.push(SchemaIssue::at(
                    index,
                    Some(name),
                    "duplicate schema name",
                ));
            }
        }

        if let Some(description) = schema.get("description") {
            if !description.is_string() {
                issues.push(SchemaIssue::at(index, name, "description must be a string"));
            }
        }

        match schema.get("properties") {
            Some(Value::Object(properties)) => {
                check_properties(index, name, properties, &mut issues)
            }
            Some(_) => issues.push(SchemaIssue::at(index, name, "properties must be an object")),
            None => issues.push(SchemaIssue::at(index, name, "properties is required")),
        }

        match schema.get("matchCriteria") {
            Some(Value::Object(criteria)) => check_criteria(index, name, criteria, &mut issues),
            Some(_) => issues.push(SchemaIssue::at(
                index,
                name,
                "matchCriteria must be an object",
            )),
            None => issues.push(SchemaIssue::at(index, name, "matchCriteria is required")),
        }
    }

    issues
}

fn check_properties(
    index: usize,
    name: Option<&str>,
    properties: &Map<String, Value>,
    issues: &mut Vec<SchemaIssue>,
) {
    for (key, definition) in properties {
        let Some(definition) = definition.as_object() else {
            issues.push(SchemaIssue::at(
                index,
                name,
                format!("property '{}' must be an object", key),
            ));
            continue;
        };

        match definition.get("type") {
            Some(Value::String(kind)) if PropertyKind::parse(kind).is_some() => {}
            Some(Value::String(kind)) => issues.push(SchemaIssue::at(
                index,
                name,
                format!(
                    "property '{}' has unknown type '{}' (expected one of {})",
                    key,
                    kind,
                    PropertyKind::ALL
                        .iter()
                        .map(PropertyKind::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
            Some(_) => issues.push(SchemaIssue::at(
                index,
                name,
                format!("property '{}' type must be a string", key),
            )),
            None => issues.push(SchemaIssue::at(
                index,
                name,
                format!("property '{}' is missing a type", key),
            )),
        }

        if let Some(required) = definition.get("required") {
            if !required.is_boolean() {
                issues.push(SchemaIssue::at(
                    index,
                    name,
                    format!("property '{}' required must be a boolean", key),
                ));
            }
        }

        if let Some(description) = definition.get("description") {
            if !description.is_string() {
                issues.push(SchemaIssue::at(
                    index,
                    name,
                    format!("property '{}' description must be a string", key),
                ));
            }
        }
    }
}

fn check_criteria(
    index: usize,
    name: Option<&str>,
    criteria: &Map<String, Value>,
    issues: &mut Vec<SchemaIssue>,
) {
    if let Some(required) = criteria.get("requiredProperties") {
        let all_strings = required
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !all_strings {
            issues.push(SchemaIssue::at(
                index,
                name,
                "requiredProperties must be an array of strings",
            ));
        }
    }

    for key in ["folderPath", "tagPattern", "namePattern"] {
        if let Some(value) = criteria.get(key) {
            if !value.is_string() {
                issues.push(SchemaIssue::at(
                    index,
                    name,
                    format!("{} must be a string", key),
                ));
            }
        }
    }

    if let Some(values) = criteria.get("propertyValues") {
        if !values.is_object() {
            issues.push(SchemaIssue::at(
                index,
                name,
                "propertyValues must be an object",
            ));
        }
    }
}

/// Parse, check and deserialize schema document text
pub fn parse_schemas(contents: &str) -> ConfigResult<Vec<EntitySchema>> {
    let document: Value = serde_json::from_str(contents)?;
    let issues = validate_schema_document(&document);
    if !issues.is_empty() {
        return Err(ConfigError::InvalidSchemas(issues));
    }
    Ok(serde_json::from_value(document)?)
}

/// Load the schema document at `path`
pub async fn load_schemas(path: &Path) -> ConfigResult<Vec<EntitySchema>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let schemas = parse_schemas(&contents)?;
    debug!(path = %path.display(), count = schemas.len(), "loaded schemas");
    Ok(schemas)
}

/// Load the schema document at `path`, or the built-in set if there is none
pub async fn load_schemas_or_default(path: &Path) -> ConfigResult<Vec<EntitySchema>> {
    if !path.exists() {
        info!(path = %path.display(), "no schema document, using built-in schemas");
        return Ok(default_schemas());
    }
    load_schemas(path).await
}

/// Write `schemas` to `path` as pretty-printed JSON
pub async fn save_schemas(path: &Path, schemas: &[EntitySchema]) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let mut contents = serde_json::to_string_pretty(schemas)?;
    contents.push('\n');
    tokio::fs::write(path, contents).await?;
    Ok(())
}
