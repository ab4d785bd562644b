mod already_frozen;
mod frozen_mapping;
mod invalid_argument;

use already_frozen::AlreadyFrozenError;
use frozen_mapping::FrozenMappingError;
use invalid_argument::InvalidArgumentError;

use std::sync::Arc;

/// An error that can occur in Tably.
///
/// Every variant is a programming-contract violation raised synchronously at
/// the call that violated it. None are retried internally and none leave
/// partial state behind; the caller fixes the input and retries.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    FrozenMapping(FrozenMappingError),
    AlreadyFrozen(AlreadyFrozenError),
    InvalidArgument(InvalidArgumentError),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self.kind() {
            FrozenMapping(err) => core::fmt::Display::fmt(err, f),
            AlreadyFrozen(err) => core::fmt::Display::fmt(err, f),
            InvalidArgument(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", self.kind()).finish()
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn predicates_match_constructors() {
        let err = Error::frozen_mapping("User");
        assert!(err.is_frozen_mapping());
        assert!(!err.is_already_frozen());
        assert!(!err.is_invalid_argument());

        let err = Error::already_frozen("User");
        assert!(err.is_already_frozen());

        let err = Error::invalid_argument("column name is empty");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn display_names_the_entity() {
        let err = Error::frozen_mapping("User");
        assert!(err.to_string().contains("User"));
    }
}
