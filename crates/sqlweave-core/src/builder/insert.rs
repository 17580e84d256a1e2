//! INSERT statement builder.

use tracing::debug;

use super::value::Arg;
use crate::error::{Error, Result};
use crate::pool::Recycle;
use crate::render::{Render, RenderContext};

/// An INSERT statement.
///
/// Every value row must have exactly one value per declared column. A row
/// of the wrong length is rejected by the call that supplies it.
///
/// ```rust
/// use sqlweave_core::dialect::PostgresDialect;
/// use sqlweave_core::render::{render, IdentQuoting};
/// use sqlweave_core::{args, Insert};
///
/// let mut insert = Insert::new("tickets");
/// insert
///     .columns(&["subdomain_id", "state"])
///     .values(args![1, "open"])?
///     .values(args![2, "spam"])?
///     .returning(&["id"]);
///
/// let rendered = render(&insert, &PostgresDialect::new(), IdentQuoting::AsNeeded)?;
/// assert_eq!(
///     rendered.sql,
///     "INSERT INTO tickets (subdomain_id, state) VALUES ($1, $2), ($3, $4) RETURNING id"
/// );
/// # Ok::<(), sqlweave_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Arg>>,
    returning: Vec<String>,
}

impl Insert {
    /// Creates an INSERT into `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            ..Self::default()
        }
    }

    /// Sets the target table.
    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table.clear();
        self.table.push_str(table);
        self
    }

    /// Appends column names.
    pub fn columns(&mut self, cols: &[&str]) -> &mut Self {
        self.columns.extend(cols.iter().map(|c| String::from(*c)));
        self
    }

    /// Appends a value row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowArityMismatch`] if the row length differs from
    /// the number of columns declared so far, and [`Error::ArityMismatch`]
    /// if a raw value contains a `?`.
    pub fn values(&mut self, row: Vec<Arg>) -> Result<&mut Self> {
        if let Err(e) = row.iter().try_for_each(Arg::check) {
            debug!(table = %self.table, "rejected INSERT row with placeholder in raw value");
            return Err(e);
        }
        if row.len() != self.columns.len() {
            debug!(
                table = %self.table,
                expected = self.columns.len(),
                found = row.len(),
                "rejected INSERT row"
            );
            return Err(Error::RowArityMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Appends several value rows, stopping at the first bad one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowArityMismatch`] for the first row of the wrong
    /// length; rows before it are kept.
    pub fn rows<I: IntoIterator<Item = Vec<Arg>>>(&mut self, rows: I) -> Result<&mut Self> {
        for row in rows {
            self.values(row)?;
        }
        Ok(self)
    }

    /// Adds one column together with its value in the single value row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowArityMismatch`] when the statement already holds
    /// more than one row, or columns without a matching row, and
    /// [`Error::ArityMismatch`] if a raw value contains a `?`.
    pub fn set(&mut self, column: &str, value: impl Into<Arg>) -> Result<&mut Self> {
        let value = value.into();
        if let Err(e) = value.check() {
            debug!(table = %self.table, column, "rejected INSERT raw value");
            return Err(e);
        }
        let expected = self.columns.len() + 1;
        if self.rows.is_empty() && self.columns.is_empty() {
            self.rows.push(Vec::new());
        }
        let mismatch = match self.rows.as_slice() {
            [row] if row.len() + 1 == expected => None,
            [row] => Some((0, row.len() + 1)),
            [] => Some((0, 1)),
            [_, second, ..] => Some((1, second.len())),
        };
        if let Some((row, found)) = mismatch {
            debug!(table = %self.table, column, "rejected INSERT column/value pair");
            return Err(Error::RowArityMismatch {
                row,
                expected,
                found,
            });
        }
        self.columns.push(String::from(column));
        if let Some(row) = self.rows.first_mut() {
            row.push(value);
        }
        Ok(self)
    }

    /// Appends RETURNING columns.
    pub fn returning(&mut self, cols: &[&str]) -> &mut Self {
        self.returning.extend(cols.iter().map(|c| String::from(*c)));
        self
    }

    /// Returns the number of value rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Recycle for Insert {
    fn recycle(&mut self) {
        self.table.clear();
        self.columns.clear();
        self.rows.clear();
        self.returning.clear();
    }
}

impl Render for Insert {
    fn kind(&self) -> &'static str {
        "INSERT"
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::MissingTable {
                statement: self.kind(),
            });
        }
        if self.columns.is_empty() {
            return Err(Error::MissingColumns);
        }
        if self.rows.is_empty() {
            return Err(Error::MissingValues);
        }
        // Columns may have been added after rows.
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(Error::RowArityMismatch {
                row: i,
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        ctx.push("INSERT INTO ");
        ctx.write_name(&self.table)?;
        ctx.push(" (");
        ctx.write_names(&self.columns)?;
        ctx.push(") VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            ctx.push("(");
            for (j, arg) in row.iter().enumerate() {
                if j > 0 {
                    ctx.push(", ");
                }
                ctx.write_arg(arg)?;
            }
            ctx.push(")");
        }
        ctx.push_returning(&self.returning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::builder::value::{raw, SqlValue};
    use crate::dialect::{GenericDialect, MySqlDialect};
    use crate::render::{render, IdentQuoting};

    fn generic(insert: &Insert) -> Result<String> {
        render(insert, &GenericDialect::new(), IdentQuoting::AsNeeded).map(|r| r.sql)
    }

    #[test]
    fn test_simple_insert() {
        let mut insert = Insert::new("users");
        insert
            .columns(&["name", "email"])
            .values(args!["Alice", "alice@example.com"])
            .unwrap();
        let rendered = render(&insert, &GenericDialect::new(), IdentQuoting::AsNeeded).unwrap();
        assert_eq!(rendered.sql, "INSERT INTO users (name, email) VALUES (?, ?)");
        assert_eq!(rendered.args.len(), 2);
    }

    #[test]
    fn test_row_arity_rejected_at_call() {
        let mut insert = Insert::new("t");
        insert.columns(&["a", "b"]);
        let err = insert.values(args![1]).unwrap_err();
        assert_eq!(
            err,
            Error::RowArityMismatch {
                row: 0,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(insert.row_count(), 0);
    }

    #[test]
    fn test_values_before_columns() {
        let mut insert = Insert::new("t");
        assert_eq!(
            insert.values(args![1]).unwrap_err(),
            Error::RowArityMismatch {
                row: 0,
                expected: 0,
                found: 1
            }
        );
    }

    #[test]
    fn test_rows_stop_at_first_bad_row() {
        let mut insert = Insert::new("t");
        insert.columns(&["a"]);
        let err = insert
            .rows(vec![args![1], args![2], args![3, 4]])
            .unwrap_err();
        assert!(matches!(err, Error::RowArityMismatch { row: 2, .. }));
        assert_eq!(insert.row_count(), 2);
    }

    #[test]
    fn test_columns_added_after_rows_fail_render() {
        let mut insert = Insert::new("t");
        insert.columns(&["a"]).values(args![1]).unwrap();
        insert.columns(&["b"]);
        assert_eq!(
            generic(&insert),
            Err(Error::RowArityMismatch {
                row: 0,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_set_pairs() {
        let mut insert = Insert::new("mytable");
        insert
            .set("id", 10)
            .unwrap()
            .set("name", "Bob")
            .unwrap()
            .set("created_at", raw("CURRENT_TIMESTAMP"))
            .unwrap();
        let rendered = render(&insert, &GenericDialect::new(), IdentQuoting::AsNeeded).unwrap();
        assert_eq!(
            rendered.sql,
            "INSERT INTO mytable (id, name, created_at) VALUES (?, ?, CURRENT_TIMESTAMP)"
        );
        assert_eq!(
            rendered.args,
            vec![SqlValue::Int(10), SqlValue::Text(String::from("Bob"))]
        );
    }

    #[test]
    fn test_set_rejects_multi_row() {
        let mut insert = Insert::new("t");
        insert
            .columns(&["a"])
            .rows(vec![args![1], args![2]])
            .unwrap();
        assert_eq!(
            insert.set("b", 3).unwrap_err(),
            Error::RowArityMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        );

        let mut insert = Insert::new("t");
        insert.columns(&["a"]);
        assert!(matches!(
            insert.set("b", 3),
            Err(Error::RowArityMismatch { row: 0, .. })
        ));
    }

    #[test]
    fn test_raw_placeholder_rejected_at_the_call() {
        let expected = Error::ArityMismatch {
            placeholders: 1,
            args: 0,
        };
        let mut insert = Insert::new("t");
        assert_eq!(insert.set("a", raw("LOWER(?)")).unwrap_err(), expected);
        assert_eq!(insert.row_count(), 0);

        insert.columns(&["a", "b"]);
        assert_eq!(
            insert.values(args![1, raw("NOW() - ?")]).unwrap_err(),
            expected
        );
        assert_eq!(insert.row_count(), 0);
        insert.values(args![1, raw("NOW()")]).unwrap();
        assert_eq!(insert.row_count(), 1);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            generic(&Insert::new("")),
            Err(Error::MissingTable {
                statement: "INSERT"
            })
        );
        assert_eq!(generic(&Insert::new("t")), Err(Error::MissingColumns));
        let mut insert = Insert::new("t");
        insert.columns(&["a"]);
        assert_eq!(generic(&insert), Err(Error::MissingValues));
    }

    #[test]
    fn test_returning_unsupported() {
        let mut insert = Insert::new("t");
        insert.set("a", 1).unwrap().returning(&["id"]);
        let err = render(&insert, &MySqlDialect::new(), IdentQuoting::AsNeeded).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn test_recycle() {
        let mut insert = Insert::new("t");
        insert.set("a", 1).unwrap();
        insert.recycle();
        assert_eq!(insert, Insert::default());
    }
}
