//! SQL Dialect support.
//!
//! Different databases disagree on placeholder syntax, identifier quoting and
//! paging. This module provides a trait for that dialect-specific behavior.
//! Dialects are immutable and are shared by reference across any number of
//! concurrent renders.

mod custom;
mod generic;
mod mysql;
mod postgres;
mod sqlite;

pub use custom::CustomDialect;
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

/// How bound parameters are spelled in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaceholderStyle {
    /// Positional `?`.
    #[default]
    Question,
    /// Numbered `$1`, `$2`, ...
    Dollar,
    /// Numbered `:1`, `:2`, ...
    Colon,
}

/// Keyword layout used for row limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LimitSyntax {
    /// `LIMIT n OFFSET m`.
    #[default]
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
    OffsetFetch,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &str;

    /// Returns the parameter placeholder style.
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    /// Returns the opening and closing identifier quote characters.
    fn identifier_quotes(&self) -> (char, char) {
        ('"', '"')
    }

    /// Returns the LIMIT/OFFSET keyword layout.
    fn limit_syntax(&self) -> LimitSyntax {
        LimitSyntax::LimitOffset
    }

    /// Count written after `LIMIT` when only an offset is set, for dialects
    /// that cannot express a bare `OFFSET`.
    fn unbounded_limit(&self) -> Option<&str> {
        None
    }

    /// Returns whether the dialect supports RETURNING clause.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Returns whether UPDATE and DELETE accept a LIMIT clause.
    fn supports_dml_limit(&self) -> bool {
        true
    }

    /// Writes the placeholder for the zero-based parameter `index`.
    fn write_placeholder(&self, out: &mut String, index: usize) {
        match self.placeholder_style() {
            PlaceholderStyle::Question => out.push('?'),
            PlaceholderStyle::Dollar => {
                out.push('$');
                push_decimal(out, index as u64 + 1);
            }
            PlaceholderStyle::Colon => {
                out.push(':');
                push_decimal(out, index as u64 + 1);
            }
        }
    }

    /// Writes `ident` wrapped in the dialect quotes, doubling any embedded
    /// closing quote.
    fn write_quoted(&self, out: &mut String, ident: &str) {
        let (open, close) = self.identifier_quotes();
        out.push(open);
        for c in ident.chars() {
            if c == close {
                out.push(close);
            }
            out.push(c);
        }
        out.push(close);
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_quoted(&mut out, name);
        out
    }

    /// Writes the trailing paging fragment (with a leading space), or nothing
    /// when neither value is set. Always rendered after ORDER BY.
    fn write_limit_offset(&self, out: &mut String, limit: Option<u64>, offset: Option<u64>) {
        match self.limit_syntax() {
            LimitSyntax::LimitOffset => {
                match (limit, self.unbounded_limit()) {
                    (Some(n), _) => {
                        out.push_str(" LIMIT ");
                        push_decimal(out, n);
                    }
                    (None, Some(all)) if offset.is_some() => {
                        out.push_str(" LIMIT ");
                        out.push_str(all);
                    }
                    _ => {}
                }
                if let Some(m) = offset {
                    out.push_str(" OFFSET ");
                    push_decimal(out, m);
                }
            }
            LimitSyntax::OffsetFetch => {
                if limit.is_none() && offset.is_none() {
                    return;
                }
                out.push_str(" OFFSET ");
                push_decimal(out, offset.unwrap_or(0));
                out.push_str(" ROWS");
                if let Some(n) = limit {
                    out.push_str(" FETCH NEXT ");
                    push_decimal(out, n);
                    out.push_str(" ROWS ONLY");
                }
            }
        }
    }
}

impl<D: Dialect + ?Sized> Dialect for &D {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        (**self).placeholder_style()
    }

    fn identifier_quotes(&self) -> (char, char) {
        (**self).identifier_quotes()
    }

    fn limit_syntax(&self) -> LimitSyntax {
        (**self).limit_syntax()
    }

    fn unbounded_limit(&self) -> Option<&str> {
        (**self).unbounded_limit()
    }

    fn supports_returning(&self) -> bool {
        (**self).supports_returning()
    }

    fn supports_dml_limit(&self) -> bool {
        (**self).supports_dml_limit()
    }
}

/// Writes `n` as decimal digits without going through `fmt`.
pub(crate) fn push_decimal(out: &mut String, mut n: u64) {
    // u64::MAX has 20 digits.
    let mut buf = [b'0'; 20];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + u8::try_from(n % 10).unwrap_or(0);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for &digit in &buf[pos..] {
        out.push(char::from(digit));
    }
}
