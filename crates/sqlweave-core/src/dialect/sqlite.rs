//! SQLite dialect implementation.

use super::Dialect;

/// SQLite dialect.
///
/// Positional `?` placeholders and double-quoted identifiers. SQLite cannot
/// express OFFSET without LIMIT, so an offset-only statement is rendered as
/// `LIMIT -1 OFFSET m`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn identifier_quotes(&self) -> (char, char) {
        ('"', '"') // SQLite also accepts backticks, but double quotes are standard
    }

    fn unbounded_limit(&self) -> Option<&str> {
        Some("-1")
    }

    fn supports_returning(&self) -> bool {
        true // SQLite 3.35.0+
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quotes(), ('"', '"'));
        assert!(dialect.supports_returning());
        assert!(dialect.supports_dml_limit());

        let mut out = String::new();
        dialect.write_placeholder(&mut out, 4);
        assert_eq!(out, "?");
    }
}
