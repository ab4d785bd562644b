use crate::descriptor::EntityDescriptor;

use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;
use tably_core::EntityDef;

/// Concurrency-safe map from entity-type identity to its descriptor.
///
/// Sharded, so unrelated entity types never serialize against each other.
pub(super) struct DescriptorCache {
    descriptors: DashMap<TypeId, Arc<EntityDescriptor>>,
}

impl DescriptorCache {
    pub(super) fn new() -> DescriptorCache {
        DescriptorCache {
            descriptors: DashMap::new(),
        }
    }

    /// Returns the descriptor for the key, creating it on first reference.
    ///
    /// Any number of callers racing on a never-seen key all end up with the
    /// same descriptor instance: the entry API constructs under the shard
    /// lock, so exactly one descriptor is retained per key.
    pub(super) fn get_or_create(&self, key: TypeId, entity: EntityDef) -> Arc<EntityDescriptor> {
        self.descriptors
            .entry(key)
            .or_insert_with(|| Arc::new(EntityDescriptor::new(entity)))
            .clone()
    }

    /// Discards every descriptor. A racing `get_or_create` resolves to the
    /// pre- or post-clear generation per key, never a mix.
    pub(super) fn clear(&self) {
        self.descriptors.clear();
    }

    /// Number of cached descriptors.
    pub(super) fn len(&self) -> usize {
        self.descriptors.len()
    }
}
