use crate::{
    mapping::{ColumnRule, MappingRules, MappingSource},
    EntityDef, TableMapping,
};

use heck::ToSnakeCase;

/// Pluggable policy that derives a default mapping for an entity that was
/// never explicitly registered.
///
/// Invoked at most once per descriptor, the first time a default mapping is
/// needed. The returned mapping must be mutable; the registry installs it
/// as-is.
pub trait Conventions: Send + Sync + 'static {
    fn resolve_default_mapping(&self, entity: &EntityDef) -> TableMapping;
}

/// Built-in naming conventions: snake-cased, pluralized table names,
/// snake-cased column names, and a property named `id` as the primary key.
///
/// `User` with properties `id`, `firstName` maps to table `users` with
/// columns `id` (key) and `first_name`.
#[derive(Debug, Default)]
pub struct DefaultConventions;

impl Conventions for DefaultConventions {
    fn resolve_default_mapping(&self, entity: &EntityDef) -> TableMapping {
        let table = pluralizer::pluralize(&entity.name.to_snake_case(), 2, false);

        let columns = entity
            .properties
            .iter()
            .map(|prop| {
                (
                    prop.to_string(),
                    ColumnRule {
                        column: prop.to_snake_case(),
                        primary_key: *prop == "id",
                    },
                )
            })
            .collect();

        TableMapping::from_rules(
            *entity,
            MappingRules {
                source: MappingSource::Table {
                    name: table,
                    schema: None,
                },
                columns,
            },
        )
    }
}
