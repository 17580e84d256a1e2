//! Bare-name detection and identifier quoting policy.

/// When bare table and column names are wrapped in dialect quotes.
///
/// Only bare names are affected: a name is bare when it is one or more
/// dot-separated parts matching `[A-Za-z_][A-Za-z0-9_$]*`. Everything else
/// (`COUNT(*)`, `users u`, `t.*`) is caller SQL and is written verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IdentQuoting {
    /// Quote only parts that are reserved words.
    #[default]
    AsNeeded,
    /// Quote every part.
    Always,
    /// Never quote.
    Never,
}

impl IdentQuoting {
    /// Returns whether `part` must be quoted under this policy.
    #[must_use]
    pub fn should_quote(self, part: &str) -> bool {
        match self {
            Self::AsNeeded => is_reserved(part),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Words that cannot appear unquoted as a table or column name.
const RESERVED: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE",
    "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "FULL", "GROUP",
    "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY",
    "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER",
    "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

/// Returns true if `part` is a reserved word (case-insensitive).
#[must_use]
pub fn is_reserved(part: &str) -> bool {
    RESERVED.iter().any(|kw| kw.eq_ignore_ascii_case(part))
}

/// Returns true if `part` is a single unquoted identifier.
fn is_bare_part(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Returns true if `name` is a bare, possibly dotted, identifier.
#[must_use]
pub fn is_bare(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_bare_part)
}
