use tably_core::{
    Conventions, Dialect, EntityDef, Error, Result, SqlArtifact, SqlGenerator, StatementOptions,
    TableMapping,
};

use by_address::ByAddress;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// The per-entity-type record: the type's current default mapping and the
/// SQL artifacts derived from every mapping instance used with it.
///
/// At most one descriptor exists per entity type for the life of the
/// registry (until an explicit clear). Artifacts are keyed by mapping
/// *identity*, never content equality: a replaced default leaves the old
/// instance's artifacts cached against the old instance, and two
/// equal-content mappings build and freeze independently.
pub struct EntityDescriptor {
    entity: EntityDef,

    /// Replaceable until first use; resolved via the convention strategy on
    /// first access when nothing was registered explicitly.
    default_mapping: Mutex<Option<Arc<TableMapping>>>,

    /// Artifacts keyed by the mapping instance that produced them.
    artifacts: Mutex<HashMap<ByAddress<Arc<TableMapping>>, Arc<SqlArtifact>>>,
}

impl EntityDescriptor {
    pub(crate) fn new(entity: EntityDef) -> EntityDescriptor {
        EntityDescriptor {
            entity,
            default_mapping: Mutex::new(None),
            artifacts: Mutex::new(HashMap::new()),
        }
    }

    /// The entity this descriptor tracks.
    pub fn entity(&self) -> &EntityDef {
        &self.entity
    }

    /// Returns the current default mapping, resolving one through the given
    /// convention strategy on first access. The strategy runs at most once
    /// per descriptor.
    pub fn default_mapping(&self, conventions: &dyn Conventions) -> Arc<TableMapping> {
        let mut slot = self.default_mapping.lock();
        slot.get_or_insert_with(|| {
            tracing::debug!(entity = self.entity.name, "resolving default mapping");
            Arc::new(conventions.resolve_default_mapping(&self.entity))
        })
        .clone()
    }

    /// Installs a caller-supplied mapping as the default.
    ///
    /// Rejects a frozen mapping (fork it first) and a mapping built for a
    /// different entity. On failure nothing changes; on success artifacts
    /// cached under the previous default stay keyed to that old instance.
    pub fn install_default(&self, mapping: Arc<TableMapping>) -> Result<()> {
        if mapping.entity() != &self.entity {
            return Err(Error::invalid_argument(format!(
                "mapping for entity `{}` supplied to descriptor for `{}`",
                mapping.entity().name,
                self.entity.name
            )));
        }
        if mapping.is_frozen() {
            return Err(Error::already_frozen(self.entity.name));
        }
        self.replace_default(mapping);
        Ok(())
    }

    /// Unconditionally replaces the default mapping. Registration path; the
    /// caller guarantees the mapping is fresh and belongs to this entity.
    pub(crate) fn replace_default(&self, mapping: Arc<TableMapping>) {
        *self.default_mapping.lock() = Some(mapping);
    }

    /// Looks up or builds the artifact for the given mapping instance,
    /// freezing the mapping as a side effect of first use.
    ///
    /// Concurrent first-time callers may duplicate the build; exactly one
    /// result is retained and returned to everyone.
    pub fn artifact(
        &self,
        mapping: &Arc<TableMapping>,
        generator: &dyn SqlGenerator,
        dialect: Dialect,
        options: &StatementOptions,
    ) -> Result<Arc<SqlArtifact>> {
        if mapping.entity() != &self.entity {
            return Err(Error::invalid_argument(format!(
                "mapping for entity `{}` supplied to descriptor for `{}`",
                mapping.entity().name,
                self.entity.name
            )));
        }

        // First use freezes, and generation must observe the mapping frozen.
        mapping.freeze();

        let key = ByAddress(mapping.clone());
        if let Some(artifact) = self.artifacts.lock().get(&key) {
            return Ok(artifact.clone());
        }

        tracing::debug!(entity = self.entity.name, ?dialect, "building SQL artifact");
        let built = Arc::new(generator.build_artifact(mapping, dialect, options)?);
        Ok(self.artifacts.lock().entry(key).or_insert(built).clone())
    }
}
