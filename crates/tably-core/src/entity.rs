/// The static shape of an entity type as seen by the mapping layer.
///
/// An `EntityDef` is captured once from the application-facing entity trait
/// and carried by every mapping derived for that type. Two defs describe the
/// same entity when their names match; descriptor-level identity is handled
/// separately by the registry (keyed on `TypeId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDef {
    /// Name of the entity type, used to derive default table/column names.
    pub name: &'static str,

    /// Property names, in declaration order.
    pub properties: &'static [&'static str],
}

impl EntityDef {
    /// Returns true if the entity declares a property with the given name.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| *p == name)
    }
}
