use arc_swap::ArcSwap;
use std::sync::Arc;
use tably_core::{Conventions, DefaultConventions, Dialect, StatementOptions};

/// Registry-wide settings: three independently swappable cells.
///
/// These are read on every artifact build and replaced rarely, so each cell
/// is an atomic reference swap: readers never block and always observe a
/// fully-constructed value, either the previous one or the new one. There is
/// no atomicity *across* cells.
pub(super) struct Settings {
    dialect: ArcSwap<Dialect>,
    conventions: ArcSwap<Arc<dyn Conventions>>,
    statement_options: ArcSwap<StatementOptions>,
}

impl Settings {
    pub(super) fn new() -> Settings {
        Settings {
            dialect: ArcSwap::from_pointee(Dialect::default()),
            conventions: ArcSwap::from_pointee(Arc::new(DefaultConventions) as Arc<dyn Conventions>),
            statement_options: ArcSwap::from_pointee(StatementOptions::default()),
        }
    }

    pub(super) fn dialect(&self) -> Dialect {
        **self.dialect.load()
    }

    pub(super) fn set_dialect(&self, dialect: Dialect) {
        self.dialect.store(Arc::new(dialect));
    }

    pub(super) fn conventions(&self) -> Arc<dyn Conventions> {
        Arc::clone(&self.conventions.load())
    }

    pub(super) fn set_conventions(&self, conventions: Arc<dyn Conventions>) {
        self.conventions.store(Arc::new(conventions));
    }

    pub(super) fn statement_options(&self) -> StatementOptions {
        StatementOptions::clone(&self.statement_options.load())
    }

    pub(super) fn set_statement_options(&self, options: StatementOptions) {
        self.statement_options.store(Arc::new(options));
    }
}
