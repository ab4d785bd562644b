mod error;
pub use error::Error;

pub mod artifact;
pub use artifact::{SqlArtifact, SqlBuilder, SqlGenerator};

pub mod conventions;
pub use conventions::{Conventions, DefaultConventions};

mod dialect;
pub use dialect::Dialect;

mod entity;
pub use entity::EntityDef;

pub mod mapping;
pub use mapping::{ColumnRule, MappingRules, MappingSource, TableMapping};

mod options;
pub use options::StatementOptions;

/// A Result type alias that uses Tably's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
