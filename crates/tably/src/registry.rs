mod cache;
mod settings;

use cache::DescriptorCache;
use settings::Settings;

use crate::{descriptor::EntityDescriptor, Entity};

use std::any::TypeId;
use std::sync::Arc;
use tably_core::{
    Conventions, Dialect, Result, SqlBuilder, SqlGenerator, StatementOptions, TableMapping,
};

/// The mapping registry: registers per-entity mapping metadata once and
/// serves it to every subsequent query-building operation.
///
/// Every operation is a short, thread-safe critical section over in-memory
/// state; callers need no external synchronization. Construct one per
/// process (or use [`crate::global`]) and share it by reference.
pub struct Registry {
    descriptors: DescriptorCache,
    settings: Settings,
    sql: Arc<dyn SqlGenerator>,
}

impl Registry {
    /// Creates a registry backed by the built-in serializer.
    pub fn new() -> Registry {
        Registry::with_generator(Arc::new(tably_sql::Serializer::new()))
    }

    /// Creates a registry backed by the given SQL-generation collaborator.
    pub fn with_generator(sql: Arc<dyn SqlGenerator>) -> Registry {
        Registry {
            descriptors: DescriptorCache::new(),
            settings: Settings::new(),
            sql,
        }
    }

    fn descriptor<T: Entity>(&self) -> Arc<EntityDescriptor> {
        self.descriptors.get_or_create(TypeId::of::<T>(), T::def())
    }

    /// Registers an entity with a fresh mutable identity mapping, installed
    /// unconditionally as the type's default.
    ///
    /// Overwriting a default that was already used for SQL generation is
    /// safe: its artifacts stay cached against that old mapping instance.
    pub fn register_entity<T: Entity>(&self) -> Arc<TableMapping> {
        let mapping = Arc::new(TableMapping::new(T::def()));
        self.descriptor::<T>().replace_default(mapping.clone());
        tracing::debug!(entity = T::name(), "registered entity");
        mapping
    }

    /// Returns the entity's current default mapping, resolving one through
    /// the current convention strategy on first access.
    pub fn default_mapping<T: Entity>(&self) -> Arc<TableMapping> {
        self.descriptor::<T>()
            .default_mapping(&*self.settings.conventions())
    }

    /// Installs a caller-supplied mapping as the entity's default. Fails
    /// with an already-frozen error if the mapping was used for SQL
    /// generation before (fork it first), and an invalid-argument error if
    /// it belongs to a different entity.
    pub fn set_default_mapping<T: Entity>(&self, mapping: Arc<TableMapping>) -> Result<()> {
        self.descriptor::<T>().install_default(mapping)
    }

    /// Returns the SQL builder for the entity's default mapping, freezing
    /// the mapping on first use and caching the generated artifact.
    pub fn sql_builder<T: Entity>(&self) -> Result<SqlBuilder> {
        let descriptor = self.descriptor::<T>();
        let mapping = descriptor.default_mapping(&*self.settings.conventions());
        self.builder_for(&descriptor, &mapping)
    }

    /// Like [`Registry::sql_builder`], but for a caller-supplied mapping,
    /// which may be a one-off never installed as the default. The artifact
    /// is cached against that exact instance.
    pub fn sql_builder_with<T: Entity>(&self, mapping: &Arc<TableMapping>) -> Result<SqlBuilder> {
        let descriptor = self.descriptor::<T>();
        self.builder_for(&descriptor, mapping)
    }

    fn builder_for(
        &self,
        descriptor: &EntityDescriptor,
        mapping: &Arc<TableMapping>,
    ) -> Result<SqlBuilder> {
        let artifact = descriptor.artifact(
            mapping,
            &*self.sql,
            self.settings.dialect(),
            &self.settings.statement_options(),
        )?;
        Ok(artifact.builder())
    }

    /// Discards every registration: descriptors, default mappings, and
    /// cached artifacts. The next reference to an entity starts from a
    /// fresh, convention-resolved default.
    pub fn clear(&self) {
        self.descriptors.clear();
        tracing::debug!("cleared all entity registrations");
    }

    /// Number of entity types currently tracked.
    pub fn entity_count(&self) -> usize {
        self.descriptors.len()
    }

    /// The dialect artifacts are built for.
    pub fn dialect(&self) -> Dialect {
        self.settings.dialect()
    }

    /// Replaces the dialect. Affects artifacts built after the call
    /// returns, not ones already cached.
    pub fn set_dialect(&self, dialect: Dialect) {
        self.settings.set_dialect(dialect);
    }

    /// The current convention strategy.
    pub fn conventions(&self) -> Arc<dyn Conventions> {
        self.settings.conventions()
    }

    /// Replaces the convention strategy. Affects defaults resolved after
    /// the call returns, not ones already installed.
    pub fn set_conventions(&self, conventions: Arc<dyn Conventions>) {
        self.settings.set_conventions(conventions);
    }

    /// The default statement options captured into new artifacts.
    pub fn statement_options(&self) -> StatementOptions {
        self.settings.statement_options()
    }

    /// Replaces the default statement options.
    pub fn set_statement_options(&self, options: StatementOptions) {
        self.settings.set_statement_options(options);
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}
