use atlas_core::{EntitySchema, MatchCriteria, PropertyDefinition, PropertyKind};

fn typed(name: &str, type_note: &str, description: &str) -> EntitySchema {
    EntitySchema::new(name)
        .with_description(description)
        .with_property(
            "name",
            PropertyDefinition::new(PropertyKind::String).required(),
        )
        .with_criteria(
            MatchCriteria::new()
                .require(["is"])
                .with_value("is", format!("[[{}]]", type_note)),
        )
}

/// Starter schemas written by `schemas init` and used when a vault has none
pub fn default_schemas() -> Vec<EntitySchema> {
    vec![
        typed("Person", "type/person", "An individual")
            .with_property("email", PropertyDefinition::new(PropertyKind::String))
            .with_property("aliases", PropertyDefinition::new(PropertyKind::Array)),
        typed("Organization", "type/organization", "A company, team or group")
            .with_property("website", PropertyDefinition::new(PropertyKind::String)),
        typed("Project", "type/project", "A body of work with an outcome")
            .with_property(
                "status",
                PropertyDefinition::new(PropertyKind::String)
                    .required()
                    .with_default("active"),
            )
            .with_property("owner", PropertyDefinition::new(PropertyKind::String)),
    ]
}
