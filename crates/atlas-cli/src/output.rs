//! Table and JSON rendering

use anyhow::Result;
use atlas_core::{EntityInstance, EntitySchema, ValidationSummary};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use indexmap::IndexMap;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn status_cell(instance: &EntityInstance) -> Cell {
    if instance.has_drift() {
        Cell::new("drift").fg(Color::Yellow)
    } else {
        Cell::new("ok").fg(Color::Green)
    }
}

/// One row per instance: file, type, status and missing fields
pub fn instances_table(instances: &[EntityInstance]) -> Table {
    let mut table = table(vec!["File", "Type", "Status", "Missing"]);
    for instance in instances {
        table.add_row(vec![
            Cell::new(&instance.file.path),
            Cell::new(&instance.entity_type),
            status_cell(instance),
            Cell::new(instance.missing_properties.join(", ")),
        ]);
    }
    table
}

/// Entity types with counts and descriptions, in priority order
pub fn types_table(schemas: &[EntitySchema], counts: &IndexMap<String, usize>) -> Table {
    let mut table = table(vec!["Type", "Instances", "Description"]);
    for schema in schemas {
        table.add_row(vec![
            Cell::new(&schema.name),
            Cell::new(counts.get(&schema.name).copied().unwrap_or(0)),
            Cell::new(schema.description.as_deref().unwrap_or("")),
        ]);
    }
    table
}

/// Summary lines for `validate`
pub fn summary_lines(summary: &ValidationSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "{} entities, {} valid, {} with issues",
        summary.total,
        summary.valid,
        summary.issues.len()
    )];
    lines.extend(summary.issues.iter().map(|issue| format!("  {}", issue)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{FileRef, PropertyMap};

    fn instance(path: &str, missing: &[&str]) -> EntityInstance {
        EntityInstance {
            file: FileRef::new(path),
            entity_type: "Person".into(),
            properties: PropertyMap::new(),
            missing_properties: missing.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn instances_table_lists_missing_fields() {
        let rendered = instances_table(&[
            instance("people/ada.md", &[]),
            instance("people/bob.md", &["name", "email"]),
        ])
        .to_string();

        assert!(rendered.contains("people/ada.md"));
        assert!(rendered.contains("name, email"));
        assert!(rendered.contains("drift"));
    }

    #[test]
    fn summary_lines_indent_issues() {
        let summary = ValidationSummary {
            total: 2,
            valid: 1,
            issues: vec!["people/bob.md: missing name".into()],
        };
        assert_eq!(
            summary_lines(&summary),
            vec![
                "2 entities, 1 valid, 1 with issues".to_string(),
                "  people/bob.md: missing name".to_string(),
            ]
        );
    }
}
