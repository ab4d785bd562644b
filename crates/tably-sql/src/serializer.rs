use tably_core::{
    mapping::{MappingRules, MappingSource},
    Dialect, Error, Result, SqlArtifact, SqlGenerator, StatementOptions, TableMapping,
};

/// Renders a frozen mapping into its statement set.
///
/// Dialect differences are concentrated on [`Dialect`] itself: identifier
/// quoting and placeholder style. Statement shape is otherwise identical
/// across flavors.
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

/// Hands out positional parameter placeholders in statement order.
struct Params {
    dialect: Dialect,
    next: usize,
}

impl Params {
    fn new(dialect: Dialect) -> Params {
        Params { dialect, next: 1 }
    }

    fn push(&mut self) -> String {
        let placeholder = self.dialect.placeholder(self.next);
        self.next += 1;
        placeholder
    }
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    fn serialize_source(&self, rules: &MappingRules, dialect: Dialect) -> String {
        match &rules.source {
            MappingSource::Table { name, schema } => match schema {
                Some(schema) => format!("{}.{}", dialect.quote(schema), dialect.quote(name)),
                None => dialect.quote(name),
            },
            MappingSource::Function { name, args } => {
                let mut params = Params::new(dialect);
                let args: Vec<_> = args.iter().map(|_| params.push()).collect();
                format!("{}({})", dialect.quote(name), args.join(", "))
            }
        }
    }

    fn serialize_select(
        &self,
        rules: &MappingRules,
        dialect: Dialect,
        options: &StatementOptions,
    ) -> String {
        let columns: Vec<_> = rules
            .columns
            .values()
            .map(|rule| dialect.quote(&rule.column))
            .collect();

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            self.serialize_source(rules, dialect)
        );
        if let Some(max_rows) = options.max_rows {
            sql.push_str(&format!(" LIMIT {max_rows}"));
        }
        sql
    }

    fn serialize_insert(&self, rules: &MappingRules, dialect: Dialect) -> Option<String> {
        if !rules.source.is_table() {
            return None;
        }

        let mut params = Params::new(dialect);
        let columns: Vec<_> = rules
            .columns
            .values()
            .map(|rule| dialect.quote(&rule.column))
            .collect();
        let values: Vec<_> = rules.columns.values().map(|_| params.push()).collect();

        Some(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.serialize_source(rules, dialect),
            columns.join(", "),
            values.join(", ")
        ))
    }

    fn serialize_update(&self, rules: &MappingRules, dialect: Dialect) -> Option<String> {
        if !rules.source.is_table() {
            return None;
        }
        if rules.key_properties().next().is_none() || rules.data_properties().next().is_none() {
            return None;
        }

        let mut params = Params::new(dialect);
        let assignments: Vec<_> = rules
            .data_properties()
            .map(|(_, rule)| format!("{} = {}", dialect.quote(&rule.column), params.push()))
            .collect();
        let filter: Vec<_> = rules
            .key_properties()
            .map(|(_, rule)| format!("{} = {}", dialect.quote(&rule.column), params.push()))
            .collect();

        Some(format!(
            "UPDATE {} SET {} WHERE {}",
            self.serialize_source(rules, dialect),
            assignments.join(", "),
            filter.join(" AND ")
        ))
    }

    fn serialize_delete(&self, rules: &MappingRules, dialect: Dialect) -> Option<String> {
        if !rules.source.is_table() {
            return None;
        }
        if rules.key_properties().next().is_none() {
            return None;
        }

        let mut params = Params::new(dialect);
        let filter: Vec<_> = rules
            .key_properties()
            .map(|(_, rule)| format!("{} = {}", dialect.quote(&rule.column), params.push()))
            .collect();

        Some(format!(
            "DELETE FROM {} WHERE {}",
            self.serialize_source(rules, dialect),
            filter.join(" AND ")
        ))
    }
}

impl SqlGenerator for Serializer {
    fn build_artifact(
        &self,
        mapping: &TableMapping,
        dialect: Dialect,
        options: &StatementOptions,
    ) -> Result<SqlArtifact> {
        debug_assert!(mapping.is_frozen(), "artifact built from a mutable mapping");

        let rules = mapping.snapshot();
        if rules.columns.is_empty() {
            return Err(Error::invalid_argument(format!(
                "mapping for entity `{}` has no columns",
                mapping.entity().name
            )));
        }

        Ok(SqlArtifact {
            dialect,
            options: options.clone(),
            select: self.serialize_select(&rules, dialect, options),
            insert: self.serialize_insert(&rules, dialect),
            update_by_key: self.serialize_update(&rules, dialect),
            delete_by_key: self.serialize_delete(&rules, dialect),
        })
    }
}
