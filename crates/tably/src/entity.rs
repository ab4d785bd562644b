use tably_core::EntityDef;

/// An application type that maps to a relation.
///
/// The registry keys descriptors on the implementing type's `TypeId`, so two
/// distinct Rust types are always two distinct entities, whatever their
/// names.
pub trait Entity: 'static {
    /// Name of the entity type, used to derive default table/column names.
    fn name() -> &'static str;

    /// Property names, in declaration order.
    fn properties() -> &'static [&'static str];

    /// The static shape handed to mappings and convention strategies.
    fn def() -> EntityDef {
        EntityDef {
            name: Self::name(),
            properties: Self::properties(),
        }
    }
}
