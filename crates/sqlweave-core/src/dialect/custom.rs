//! Configuration-driven dialect.

use std::borrow::Cow;

use super::{Dialect, LimitSyntax, PlaceholderStyle};

/// A dialect described entirely by configuration values.
///
/// Useful for databases without a built-in dialect, or for loading the
/// rendering rules from a configuration file (with the `serde` feature).
///
/// ```rust
/// use sqlweave_core::dialect::{CustomDialect, Dialect, LimitSyntax, PlaceholderStyle};
///
/// const MSSQL_LIKE: CustomDialect = CustomDialect::new("mssql-like")
///     .with_quotes('[', ']')
///     .with_limit_syntax(LimitSyntax::OffsetFetch);
///
/// assert_eq!(MSSQL_LIKE.quote_identifier("order"), "[order]");
/// assert_eq!(MSSQL_LIKE.placeholder_style(), PlaceholderStyle::Question);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CustomDialect {
    /// Dialect name used in error messages and logs.
    pub name: Cow<'static, str>,
    /// Placeholder spelling.
    pub placeholder: PlaceholderStyle,
    /// Opening identifier quote.
    pub quote_open: char,
    /// Closing identifier quote.
    pub quote_close: char,
    /// LIMIT/OFFSET layout.
    pub limit_syntax: LimitSyntax,
    /// Count emitted as `LIMIT <n>` when only OFFSET is set.
    pub unbounded_limit: Option<Cow<'static, str>>,
    /// Whether `RETURNING` is accepted.
    pub returning: bool,
    /// Whether UPDATE/DELETE accept LIMIT.
    pub dml_limit: bool,
}

impl CustomDialect {
    /// Creates a dialect with generic defaults under the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            placeholder: PlaceholderStyle::Question,
            quote_open: '"',
            quote_close: '"',
            limit_syntax: LimitSyntax::LimitOffset,
            unbounded_limit: None,
            returning: false,
            dml_limit: true,
        }
    }

    /// Sets the placeholder style.
    #[must_use]
    pub const fn with_placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Sets the identifier quote pair.
    #[must_use]
    pub const fn with_quotes(mut self, open: char, close: char) -> Self {
        self.quote_open = open;
        self.quote_close = close;
        self
    }

    /// Sets the LIMIT/OFFSET layout.
    #[must_use]
    pub const fn with_limit_syntax(mut self, syntax: LimitSyntax) -> Self {
        self.limit_syntax = syntax;
        self
    }

    /// Sets the count used for offset-only paging.
    #[must_use]
    pub fn with_unbounded_limit(mut self, count: &'static str) -> Self {
        self.unbounded_limit = Some(Cow::Borrowed(count));
        self
    }

    /// Enables or disables `RETURNING`.
    #[must_use]
    pub const fn with_returning(mut self, enabled: bool) -> Self {
        self.returning = enabled;
        self
    }

    /// Enables or disables LIMIT on UPDATE/DELETE.
    #[must_use]
    pub const fn with_dml_limit(mut self, enabled: bool) -> Self {
        self.dml_limit = enabled;
        self
    }
}

impl Default for CustomDialect {
    fn default() -> Self {
        Self::new("custom")
    }
}

impl Dialect for CustomDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder
    }

    fn identifier_quotes(&self) -> (char, char) {
        (self.quote_open, self.quote_close)
    }

    fn limit_syntax(&self) -> LimitSyntax {
        self.limit_syntax
    }

    fn unbounded_limit(&self) -> Option<&str> {
        self.unbounded_limit.as_deref()
    }

    fn supports_returning(&self) -> bool {
        self.returning
    }

    fn supports_dml_limit(&self) -> bool {
        self.dml_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_defaults_match_generic() {
        let dialect = CustomDialect::default();
        assert_eq!(dialect.name(), "custom");
        assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Question);
        assert_eq!(dialect.identifier_quotes(), ('"', '"'));
        assert!(dialect.supports_dml_limit());
    }

    #[test]
    fn test_colon_placeholders_and_brackets() {
        let dialect = CustomDialect::new("oracle-like")
            .with_placeholder(PlaceholderStyle::Colon)
            .with_quotes('[', ']');
        let mut out = String::new();
        dialect.write_placeholder(&mut out, 2);
        assert_eq!(out, ":3");
        assert_eq!(dialect.quote_identifier("a]b"), "[a]]b]");
    }

    #[test]
    fn test_unbounded_limit() {
        let dialect = CustomDialect::new("x").with_unbounded_limit("ALL");
        let mut out = String::new();
        dialect.write_limit_offset(&mut out, None, Some(4));
        assert_eq!(out, " LIMIT ALL OFFSET 4");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_from_json() {
        let dialect: CustomDialect = serde_json::from_str(
            r#"{"name": "pg-like", "placeholder": "dollar", "returning": true}"#,
        )
        .unwrap();
        assert_eq!(dialect.name(), "pg-like");
        assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Dollar);
        assert!(dialect.supports_returning());
        assert_eq!(dialect.identifier_quotes(), ('"', '"'));
    }
}
