use crate::{Dialect, Result, StatementOptions, TableMapping};

use std::sync::Arc;

/// The generated statement set derived from one frozen mapping instance.
///
/// Artifacts are cached by the registry keyed on the mapping instance that
/// produced them, and capture the dialect and statement options in effect at
/// build time. They are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlArtifact {
    pub dialect: Dialect,
    pub options: StatementOptions,

    /// SELECT over every mapped column.
    pub select: String,

    /// INSERT of every mapped column. Absent for function sources.
    pub insert: Option<String>,

    /// UPDATE of non-key columns filtered by the primary key. Absent for
    /// function sources and mappings with no key or no non-key column.
    pub update_by_key: Option<String>,

    /// DELETE filtered by the primary key. Absent for function sources and
    /// mappings with no key.
    pub delete_by_key: Option<String>,
}

impl SqlArtifact {
    /// Returns the builder handle for this artifact.
    pub fn builder(self: &Arc<SqlArtifact>) -> SqlBuilder {
        SqlBuilder {
            artifact: self.clone(),
        }
    }
}

/// A cheap, cloneable handle over a cached [`SqlArtifact`]. This is what the
/// registry hands back to application code.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    artifact: Arc<SqlArtifact>,
}

impl SqlBuilder {
    pub fn dialect(&self) -> Dialect {
        self.artifact.dialect
    }

    pub fn options(&self) -> &StatementOptions {
        &self.artifact.options
    }

    pub fn select(&self) -> &str {
        &self.artifact.select
    }

    pub fn insert(&self) -> Option<&str> {
        self.artifact.insert.as_deref()
    }

    pub fn update_by_key(&self) -> Option<&str> {
        self.artifact.update_by_key.as_deref()
    }

    pub fn delete_by_key(&self) -> Option<&str> {
        self.artifact.delete_by_key.as_deref()
    }

    /// True when both handles view the same cached artifact.
    pub fn same_artifact(&self, other: &SqlBuilder) -> bool {
        Arc::ptr_eq(&self.artifact, &other.artifact)
    }
}

/// The SQL-generation collaborator.
///
/// The registry guarantees the mapping handed in is frozen by the time this
/// is called. Implementations must be pure with respect to shared state:
/// concurrent first-time builds for the same mapping may race, and only one
/// result is retained.
pub trait SqlGenerator: Send + Sync {
    fn build_artifact(
        &self,
        mapping: &TableMapping,
        dialect: Dialect,
        options: &StatementOptions,
    ) -> Result<SqlArtifact>;
}
