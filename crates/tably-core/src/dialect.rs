/// The SQL dialect a statement is rendered for.
///
/// The dialect handles the differences between database flavors: identifier
/// quoting and parameter placeholder style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Postgresql,
    Sqlite,
    Mysql,
}

impl Dialect {
    /// Quotes an identifier for this dialect.
    pub fn quote(self, ident: &str) -> String {
        match self {
            Dialect::Postgresql | Dialect::Sqlite => format!("\"{ident}\""),
            Dialect::Mysql => format!("`{ident}`"),
        }
    }

    /// Renders the placeholder for the `n`th parameter (1-based).
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Dialect::Postgresql => format!("${n}"),
            Dialect::Sqlite | Dialect::Mysql => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_per_dialect() {
        assert_eq!(Dialect::Postgresql.quote("users"), "\"users\"");
        assert_eq!(Dialect::Sqlite.quote("users"), "\"users\"");
        assert_eq!(Dialect::Mysql.quote("users"), "`users`");
    }

    #[test]
    fn placeholders_per_dialect() {
        assert_eq!(Dialect::Postgresql.placeholder(3), "$3");
        assert_eq!(Dialect::Sqlite.placeholder(3), "?");
        assert_eq!(Dialect::Mysql.placeholder(1), "?");
    }
}
