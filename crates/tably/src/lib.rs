mod descriptor;
pub use descriptor::EntityDescriptor;

mod entity;
pub use entity::Entity;

pub mod registry;
pub use registry::Registry;

pub use tably_core::{
    mapping::{ColumnRule, MappingRules, MappingSource},
    Conventions, DefaultConventions, Dialect, EntityDef, Error, Result, SqlArtifact, SqlBuilder,
    SqlGenerator, StatementOptions, TableMapping,
};

use once_cell::sync::Lazy;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry.
///
/// Initialized lazily with built-in defaults and alive for the rest of the
/// process. Purely a convenience: every operation is equally available on a
/// constructed [`Registry`], which is what tests should use.
pub fn global() -> &'static Registry {
    &GLOBAL
}
