//! DELETE statement builder.

use super::expr::{Cond, IntoPredicate};
use crate::error::{Error, Result};
use crate::pool::Recycle;
use crate::render::{Render, RenderContext};

/// A DELETE statement.
///
/// A DELETE without WHERE is valid and removes every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    table: String,
    where_clause: Vec<Cond>,
    limit: Option<u64>,
    returning: Vec<String>,
}

impl Delete {
    /// Creates a DELETE from `table`.
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

impl Recycle for Delete {
    fn recycle(&mut self) {
        self.table.clear();
        self.where_clause.clear();
        self.limit = None;
        self.returning.clear();
    }
}

impl Render for Delete {
    fn kind(&self) -> &'static str {
        "DELETE"
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::MissingTable {
                statement: self.kind(),
            });
        }
        ctx.push("DELETE FROM ");
        ctx.write_name(&self.table)?;
        if !self.where_clause.is_empty() {
            ctx.push(" WHERE ");
            Cond::render_conjunction(&self.where_clause, ctx)?;
        }
        ctx.push_dml_limit(self.limit, "DELETE ... LIMIT")?;
        ctx.push_returning(&self.returning)
    }
}
