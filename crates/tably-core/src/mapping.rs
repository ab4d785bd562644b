use crate::{EntityDef, Error, Result};

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// One entity's mapping configuration, with a one-way freeze lifecycle.
///
/// A mapping is created mutable and stays freely editable while the
/// application wires itself up. The first time it is consumed to build a SQL
/// artifact it freezes permanently: cached SQL text depends on the mapping's
/// exact shape, so every later mutation fails with a frozen-mapping error.
/// [`TableMapping::fork`] produces a fresh mutable copy when further editing
/// is needed.
///
/// All operations take `&self` and are safe to call from any thread. The
/// frozen flag is only ever set while holding the rule write lock, so a
/// mutation racing a freeze resolves to exactly one of "mutation applied,
/// then frozen" or "frozen, mutation rejected" -- never a torn rule set.
#[derive(Debug)]
pub struct TableMapping {
    entity: EntityDef,
    rules: RwLock<MappingRules>,
    frozen: AtomicBool,
}

/// The rule set held by a [`TableMapping`]: the relation it reads from or
/// writes to, and the property-to-column associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRules {
    pub source: MappingSource,

    /// Column rules keyed by property name, in insertion order.
    pub columns: IndexMap<String, ColumnRule>,
}

/// The relation an entity maps to.
///
/// A closed set of variants sharing one lifecycle: a plain table, or a
/// table-valued function invoked with positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Table {
        name: String,
        schema: Option<String>,
    },
    Function {
        name: String,
        args: Vec<String>,
    },
}

/// How a single entity property corresponds to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    pub column: String,
    pub primary_key: bool,
}

impl MappingSource {
    /// Name of the table or function.
    pub fn name(&self) -> &str {
        match self {
            MappingSource::Table { name, .. } => name,
            MappingSource::Function { name, .. } => name,
        }
    }

    /// Returns true for plain-table sources, which support write statements.
    pub fn is_table(&self) -> bool {
        matches!(self, MappingSource::Table { .. })
    }
}

impl MappingRules {
    /// Properties marked as primary key, in rule order.
    pub fn key_properties(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.columns
            .iter()
            .filter(|(_, rule)| rule.primary_key)
            .map(|(prop, rule)| (prop.as_str(), rule))
    }

    /// Properties not part of the primary key, in rule order.
    pub fn data_properties(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.columns
            .iter()
            .filter(|(_, rule)| !rule.primary_key)
            .map(|(prop, rule)| (prop.as_str(), rule))
    }
}

impl TableMapping {
    /// Creates a mutable identity mapping: the table is named after the
    /// entity and every property maps to a column of the same name. A
    /// property named `id` is marked as the primary key.
    pub fn new(entity: EntityDef) -> TableMapping {
        let columns = entity
            .properties
            .iter()
            .map(|prop| {
                (
                    prop.to_string(),
                    ColumnRule {
                        column: prop.to_string(),
                        primary_key: *prop == "id",
                    },
                )
            })
            .collect();

        TableMapping::from_rules(
            entity,
            MappingRules {
                source: MappingSource::Table {
                    name: entity.name.to_string(),
                    schema: None,
                },
                columns,
            },
        )
    }

    /// Creates a mutable mapping from an explicit rule set. Used by
    /// convention strategies that derive the rules themselves.
    pub fn from_rules(entity: EntityDef, rules: MappingRules) -> TableMapping {
        TableMapping {
            entity,
            rules: RwLock::new(rules),
            frozen: AtomicBool::new(false),
        }
    }

    /// The entity this mapping belongs to.
    pub fn entity(&self) -> &EntityDef {
        &self.entity
    }

    /// Replaces the source with a plain table of the given name.
    pub fn set_table(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("table name is empty"));
        }
        self.mutate(|rules| {
            let schema = match &rules.source {
                MappingSource::Table { schema, .. } => schema.clone(),
                MappingSource::Function { .. } => None,
            };
            rules.source = MappingSource::Table { name, schema };
            Ok(())
        })
    }

    /// Sets the schema qualifier on a table source.
    pub fn set_schema(&self, schema: impl Into<String>) -> Result<()> {
        let qualifier = schema.into();
        if qualifier.is_empty() {
            return Err(Error::invalid_argument("schema qualifier is empty"));
        }
        self.mutate(|rules| match &mut rules.source {
            MappingSource::Table { schema, .. } => {
                *schema = Some(qualifier);
                Ok(())
            }
            MappingSource::Function { .. } => Err(Error::invalid_argument(
                "schema qualifier applies to table sources only",
            )),
        })
    }

    /// Replaces the source with a table-valued function.
    pub fn use_function<I, S>(&self, name: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("function name is empty"));
        }
        let args = args.into_iter().map(Into::into).collect();
        self.mutate(|rules| {
            rules.source = MappingSource::Function { name, args };
            Ok(())
        })
    }

    /// Maps a property to a column, replacing any existing rule for it.
    pub fn map_column(&self, property: &str, column: impl Into<String>) -> Result<()> {
        let column = column.into();
        if column.is_empty() {
            return Err(Error::invalid_argument("column name is empty"));
        }
        let prop = self.known_property(property)?;
        self.mutate(|rules| {
            let primary_key = rules
                .columns
                .get(&prop)
                .map(|rule| rule.primary_key)
                .unwrap_or(false);
            rules
                .columns
                .insert(prop, ColumnRule { column, primary_key });
            Ok(())
        })
    }

    /// Removes the column rule for a property, excluding it from generated
    /// statements.
    pub fn unmap_column(&self, property: &str) -> Result<()> {
        let prop = self.known_property(property)?;
        self.mutate(|rules| {
            rules.columns.shift_remove(&prop);
            Ok(())
        })
    }

    /// Marks a property as part of the primary key, mapping it
    /// identity-style first if it has no rule yet.
    pub fn mark_primary_key(&self, property: &str) -> Result<()> {
        let prop = self.known_property(property)?;
        self.mutate(|rules| {
            let rule = rules.columns.entry(prop.clone()).or_insert(ColumnRule {
                column: prop.clone(),
                primary_key: false,
            });
            rule.primary_key = true;
            Ok(())
        })
    }

    /// Freezes the mapping. Idempotent; safe to call from any thread.
    pub fn freeze(&self) {
        // The write lock serializes against in-flight mutation so no rule
        // change lands after the flag is published.
        let _rules = self.rules.write();
        self.frozen.store(true, Ordering::Release);
    }

    /// Returns true once the mapping has frozen. Lock-free.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Returns an independent mutable copy of this mapping, whatever the
    /// frozen state of the original. Mutating either side never affects the
    /// other.
    pub fn fork(&self) -> TableMapping {
        TableMapping::from_rules(self.entity, self.rules.read().clone())
    }

    /// A deep copy of the current rule set.
    pub fn snapshot(&self) -> MappingRules {
        self.rules.read().clone()
    }

    /// Name of the table or function this mapping targets.
    pub fn table_name(&self) -> String {
        self.rules.read().source.name().to_string()
    }

    /// The column a property currently maps to, if any.
    pub fn column_for(&self, property: &str) -> Option<String> {
        self.rules
            .read()
            .columns
            .get(property)
            .map(|rule| rule.column.clone())
    }

    fn known_property(&self, property: &str) -> Result<String> {
        if !self.entity.has_property(property) {
            return Err(Error::invalid_argument(format!(
                "entity `{}` has no property `{property}`",
                self.entity.name
            )));
        }
        Ok(property.to_string())
    }

    /// Runs a mutation under the rule write lock, rejecting it first if the
    /// mapping froze. `f` must not leave the rules partially updated when it
    /// returns an error.
    fn mutate(&self, f: impl FnOnce(&mut MappingRules) -> Result<()>) -> Result<()> {
        let mut rules = self.rules.write();
        if self.frozen.load(Ordering::Acquire) {
            return Err(Error::frozen_mapping(self.entity.name));
        }
        f(&mut rules)
    }
}
