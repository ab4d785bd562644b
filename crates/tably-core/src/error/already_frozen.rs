use super::Error;

/// Error when a frozen mapping is supplied where a mutable one is required.
///
/// Installing a mapping as an entity's default hands the registry a value
/// that callers may still configure, so a mapping that already backs cached
/// SQL cannot be reused directly. The caller must `fork` it first.
#[derive(Debug)]
pub(super) struct AlreadyFrozenError {
    entity: Box<str>,
}

impl std::error::Error for AlreadyFrozenError {}

impl core::fmt::Display for AlreadyFrozenError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "mapping for entity `{}` is already frozen and cannot be installed as a default",
            self.entity
        )
    }
}

impl Error {
    /// Creates an already-frozen error for the named entity.
    pub fn already_frozen(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AlreadyFrozen(AlreadyFrozenError {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is an already-frozen error.
    pub fn is_already_frozen(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AlreadyFrozen(_))
    }
}
