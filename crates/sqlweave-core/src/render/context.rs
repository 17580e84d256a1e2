//! Per-render state threaded through the statement walk.

use super::ident::{is_bare, IdentQuoting};
use crate::builder::Fragment;
use crate::builder::value::{Arg, SqlValue};
use crate::dialect::{push_decimal, Dialect, LimitSyntax};
use crate::error::{Error, Result};
use crate::lexer::{MarkKind, Scanner};

/// Rendering context for one statement.
///
/// The placeholder counter lives here and nowhere else: it starts at zero
/// when the context is created and increases once per bound value, across
/// every clause and every nested subquery of the statement being rendered.
pub struct RenderContext<'a> {
    dialect: &'a dyn Dialect,
    quoting: IdentQuoting,
    sql: &'a mut String,
    args: &'a mut Vec<SqlValue>,
    next_index: usize,
}

impl<'a> RenderContext<'a> {
    /// Creates a context writing into the given output buffers.
    pub fn new(
        dialect: &'a dyn Dialect,
        quoting: IdentQuoting,
        sql: &'a mut String,
        args: &'a mut Vec<SqlValue>,
    ) -> Self {
        Self {
            dialect,
            quoting,
            sql,
            args,
            next_index: 0,
        }
    }

    /// Returns the target dialect.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Returns the number of placeholders emitted so far.
    #[must_use]
    pub const fn placeholders(&self) -> usize {
        self.next_index
    }

    /// Appends SQL keywords or punctuation.
    pub fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends `limit`/`offset` using the dialect's paging syntax.
    pub fn push_limit_offset(&mut self, limit: Option<u64>, offset: Option<u64>) {
        self.dialect.write_limit_offset(self.sql, limit, offset);
    }

    /// Appends ` LIMIT n` to an UPDATE or DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the dialect has no DML row limit.
    pub fn push_dml_limit(&mut self, limit: Option<u64>, feature: &'static str) -> Result<()> {
        let Some(n) = limit else {
            return Ok(());
        };
        self.require(
            self.dialect.supports_dml_limit()
                && self.dialect.limit_syntax() == LimitSyntax::LimitOffset,
            feature,
        )?;
        self.sql.push_str(" LIMIT ");
        push_decimal(self.sql, n);
        Ok(())
    }

    /// Appends a RETURNING list, or nothing when `columns` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the dialect has no RETURNING.
    pub fn push_returning(&mut self, columns: &[String]) -> Result<()> {
        if columns.is_empty() {
            return Ok(());
        }
        self.require(self.dialect.supports_returning(), "RETURNING")?;
        self.sql.push_str(" RETURNING ");
        self.write_names(columns)
    }

    /// Fails with [`Error::Unsupported`] unless `supported` holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] naming the dialect and `feature`.
    pub fn require(&self, supported: bool, feature: &'static str) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(Error::Unsupported {
                dialect: self.dialect.name().to_owned(),
                feature,
            })
        }
    }

    /// Emits the next placeholder and binds `value` to it.
    pub fn bind(&mut self, value: &SqlValue) {
        self.dialect.write_placeholder(self.sql, self.next_index);
        self.next_index += 1;
        self.args.push(value.clone());
    }

    /// Writes an argument: values are bound, raw fragments are inlined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if raw text contains a placeholder.
    pub fn write_arg(&mut self, arg: &Arg) -> Result<()> {
        match arg {
            Arg::Value(value) => {
                self.bind(value);
                Ok(())
            }
            Arg::Raw(sql) => self.write_verbatim(sql),
        }
    }

    /// Writes a table or column name.
    ///
    /// Bare names go through the quoting policy; anything else is caller SQL
    /// and is written verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an empty name or one with a
    /// NUL byte, and [`Error::ArityMismatch`] if verbatim text contains a
    /// placeholder.
    pub fn write_name(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() || name.contains('\0') {
            return Err(Error::InvalidIdentifier(name.to_owned()));
        }
        if !is_bare(name) {
            return self.write_verbatim(name);
        }
        for (i, part) in name.split('.').enumerate() {
            if i > 0 {
                self.sql.push('.');
            }
            if self.quoting.should_quote(part) {
                self.dialect.write_quoted(self.sql, part);
            } else {
                self.sql.push_str(part);
            }
        }
        Ok(())
    }

    /// Writes a comma-separated list of names.
    ///
    /// # Errors
    ///
    /// See [`RenderContext::write_name`].
    pub fn write_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.write_name(name.as_ref())?;
        }
        Ok(())
    }

    /// Writes caller SQL that carries no arguments.
    ///
    /// `??` is unescaped to `?`; a lone `?` has nothing to bind and is
    /// rejected so that placeholders and arguments never drift apart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `sql` contains a placeholder.
    pub fn write_verbatim(&mut self, sql: &str) -> Result<()> {
        let mut copied = 0;
        for mark in Scanner::new(sql) {
            if mark.kind == MarkKind::Placeholder {
                return Err(Error::ArityMismatch {
                    placeholders: Scanner::count_placeholders(sql),
                    args: 0,
                });
            }
            self.sql.push_str(&sql[copied..mark.span.start]);
            self.sql.push('?');
            copied = mark.span.end;
        }
        self.sql.push_str(&sql[copied..]);
        Ok(())
    }

    /// Writes a fragment, rewriting each `?` into the dialect placeholder
    /// and binding the matching argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if a raw argument contains a
    /// placeholder.
    pub fn write_fragment(&mut self, fragment: &Fragment) -> Result<()> {
        let sql = fragment.sql();
        let mut args = fragment.args().iter();
        let mut copied = 0;
        for mark in fragment.marks() {
            self.sql.push_str(&sql[copied..mark.span.start]);
            match mark.kind {
                MarkKind::Placeholder => {
                    // Arity was checked when the fragment was built.
                    if let Some(arg) = args.next() {
                        self.write_arg(arg)?;
                    }
                }
                MarkKind::EscapedQuestion => self.sql.push('?'),
            }
            copied = mark.span.end;
        }
        self.sql.push_str(&sql[copied..]);
        Ok(())
    }
}
