//! UPDATE statement builder.

use indexmap::IndexMap;
use tracing::debug;

use super::expr::{Cond, IntoPredicate};
use super::fragment::Fragment;
use super::value::Arg;
use crate::error::{Error, Result};
use crate::pool::Recycle;
use crate::render::{Render, RenderContext};

/// Right-hand side of a SET assignment.
#[derive(Debug, Clone, PartialEq)]
enum SetValue {
    Arg(Arg),
    Expr(Fragment),
}

/// An UPDATE statement.
///
/// Assignments form an ordered map: assigning a column twice keeps its
/// first position and the last value.
///
/// ```rust
/// use sqlweave_core::dialect::GenericDialect;
/// use sqlweave_core::render::{render, IdentQuoting};
/// use sqlweave_core::{args, Update};
///
/// let mut update = Update::new("mytable");
/// update
///     .set("foo", 1)?
///     .set_raw("bar", "COALESCE(bar, 0) + 1")?
///     .where_clause(("id = ?", args![9]))?;
///
/// let rendered = render(&update, &GenericDialect::new(), IdentQuoting::AsNeeded)?;
/// assert_eq!(
///     rendered.sql,
///     "UPDATE mytable SET foo = ?, bar = COALESCE(bar, 0) + 1 WHERE id = ?"
/// );
/// assert_eq!(rendered.args.len(), 2);
/// # Ok::<(), sqlweave_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    table: String,
    assignments: IndexMap<String, SetValue>,
    where_clause: Vec<Cond>,
    limit: Option<u64>,
    returning: Vec<String>,
}

impl Update {
    /// Creates an UPDATE of `table`.
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

    fn assign(&mut self, column: String, value: Arg) -> Result<&mut Self> {
        if let Err(e) = value.check() {
            debug!(table = %self.table, column = %column, "rejected UPDATE assignment");
            return Err(e);
        }
        self.assignments.insert(column, SetValue::Arg(value));
        Ok(self)
    }

    /// Assigns a value (or a [`crate::Raw`] expression) to a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if a raw expression contains a `?`.
    pub fn set(&mut self, column: &str, value: impl Into<Arg>) -> Result<&mut Self> {
        self.assign(String::from(column), value.into())
    }

    /// Assigns a server-side SQL expression to a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `sql` contains a `?`; use
    /// [`Update::set_expr`] to bind values into an expression.
    pub fn set_raw(&mut self, column: &str, sql: impl Into<String>) -> Result<&mut Self> {
        self.assign(String::from(column), Arg::Raw(sql.into()))
    }

    /// Assigns an expression with placeholders to a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `sql`.
    pub fn set_expr(
        &mut self,
        column: &str,
        sql: impl Into<String>,
        args: Vec<Arg>,
    ) -> Result<&mut Self> {
        let fragment = Fragment::new(sql, args)?;
        self.assignments
            .insert(String::from(column), SetValue::Expr(fragment));
        Ok(self)
    }

    /// Assigns every pair of `map` in iteration order, stopping at the first
    /// rejected one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] for a raw expression containing a
    /// `?`; pairs before it are kept.
    pub fn set_map<I, K, V>(&mut self, map: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Arg>,
    {
        for (column, value) in map {
            self.assign(column.into(), value.into())?;
        }
        Ok(self)
    }

    /// ANDs a predicate into the WHERE clause.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] for raw SQL whose placeholders and
    /// arguments disagree.
    pub fn where_clause(&mut self, predicate: impl IntoPredicate) -> Result<&mut Self> {
        self.where_clause.push(predicate.into_predicate()?);
        Ok(self)
    }

    /// Sets the row LIMIT.
    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Appends RETURNING columns.
    pub fn returning(&mut self, cols: &[&str]) -> &mut Self {
        self.returning.extend(cols.iter().map(|c| String::from(*c)));
        self
    }
}

impl Recycle for Update {
    fn recycle(&mut self) {
        self.table.clear();
        self.assignments.clear();
        self.where_clause.clear();
        self.limit = None;
        self.returning.clear();
    }
}

impl Render for Update {
    fn kind(&self) -> &'static str {
        "UPDATE"
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::MissingTable {
                statement: self.kind(),
            });
        }
        if self.assignments.is_empty() {
            return Err(Error::MissingAssignments);
        }

        ctx.push("UPDATE ");
        ctx.write_name(&self.table)?;
        ctx.push(" SET ");
        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            ctx.write_name(column)?;
            ctx.push(" = ");
            match value {
                SetValue::Arg(arg) => ctx.write_arg(arg)?,
                SetValue::Expr(fragment) => ctx.write_fragment(fragment)?,
            }
        }

        if !self.where_clause.is_empty() {
            ctx.push(" WHERE ");
            Cond::render_conjunction(&self.where_clause, ctx)?;
        }
        ctx.push_dml_limit(self.limit, "UPDATE ... LIMIT")?;
        ctx.push_returning(&self.returning)
    }
}
