use super::Error;

/// Error when a mutating operation is attempted on a frozen mapping.
///
/// A mapping freezes permanently the first time it is used to build a SQL
/// artifact (or when `freeze` is called directly). Cached SQL depends on the
/// mapping's exact shape at that point, so later mutation is rejected. To
/// keep editing, `fork` the mapping and install the copy.
#[derive(Debug)]
pub(super) struct FrozenMappingError {
    entity: Box<str>,
}

impl std::error::Error for FrozenMappingError {}

impl core::fmt::Display for FrozenMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "mapping for entity `{}` is frozen; fork it to obtain a mutable copy",
            self.entity
        )
    }
}

impl Error {
    /// Creates a frozen-mapping error for the named entity.
    pub fn frozen_mapping(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FrozenMapping(FrozenMappingError {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is a frozen-mapping error.
    pub fn is_frozen_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FrozenMapping(_))
    }
}
