//! PostgreSQL dialect implementation.

use super::{Dialect, PlaceholderStyle};

/// PostgreSQL dialect.
///
/// Numbered `$n` placeholders; UPDATE and DELETE have no LIMIT clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgresql"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Dollar
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn supports_dml_limit(&self) -> bool {
        false
    }
}
