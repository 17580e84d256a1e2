//! MySQL dialect implementation.

use super::Dialect;

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn identifier_quotes(&self) -> (char, char) {
        ('`', '`')
    }

    // MySQL documents this value for "all remaining rows".
    fn unbounded_limit(&self) -> Option<&str> {
        Some("18446744073709551615")
    }
}
