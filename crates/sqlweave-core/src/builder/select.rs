//! SELECT statement builder.
//!
//! Clauses may be added in any order; rendering always emits them in
//! canonical SQL order (SELECT, FROM, JOIN, WHERE, GROUP BY, HAVING,
//! ORDER BY, LIMIT/OFFSET).

use super::expr::{Cond, IntoPredicate};
use super::fragment::Fragment;
use super::value::Arg;
use crate::error::{Error, Result};
use crate::pool::Recycle;
use crate::render::{Render, RenderContext};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// An output column.
#[derive(Debug, Clone, PartialEq)]
enum Projection {
    Name(String),
    Expr(Fragment),
    Subquery { select: Box<Select>, alias: String },
}

/// The FROM source.
#[derive(Debug, Clone, PartialEq)]
enum Source {
    Table(String),
    Expr(Fragment),
    Subquery { select: Box<Select>, alias: String },
}

#[derive(Debug, Clone, PartialEq)]
struct Join {
    kind: JoinType,
    table: String,
    on: Fragment,
}

/// A SELECT statement.
///
/// ```rust
/// use sqlweave_core::dialect::SqliteDialect;
/// use sqlweave_core::render::{render, IdentQuoting};
/// use sqlweave_core::{col, Select};
///
/// let mut select = Select::new();
/// select
///     .columns(&["id", "title"])
///     .from("tickets")
///     .where_clause(col("state").eq("open"))?
///     .order_by_desc("id")
///     .offset(10);
///
/// let rendered = render(&select, &SqliteDialect::new(), IdentQuoting::AsNeeded)?;
/// assert_eq!(
///     rendered.sql,
///     "SELECT id, title FROM tickets WHERE state = ? ORDER BY id DESC LIMIT -1 OFFSET 10"
/// );
/// # Ok::<(), sqlweave_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    distinct: bool,
    columns: Vec<Projection>,
    from: Option<Source>,
    joins: Vec<Join>,
    where_clause: Vec<Cond>,
    group_by: Vec<String>,
    having: Vec<Cond>,
    order_by: Vec<(String, Option<OrderDirection>)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an output column.
    pub fn column(&mut self, name: &str) -> &mut Self {
        self.columns.push(Projection::Name(String::from(name)));
        self
    }

    /// Appends output columns.
    pub fn columns(&mut self, names: &[&str]) -> &mut Self {
        self.columns
            .extend(names.iter().map(|n| Projection::Name(String::from(*n))));
        self
    }

    /// Appends an output expression with placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `sql`.
    pub fn column_expr(&mut self, sql: impl Into<String>, args: Vec<Arg>) -> Result<&mut Self> {
        self.columns.push(Projection::Expr(Fragment::new(sql, args)?));
        Ok(self)
    }

    /// Appends a parenthesized subquery as an aliased output column.
    pub fn column_subquery(&mut self, select: Self, alias: &str) -> &mut Self {
        self.columns.push(Projection::Subquery {
            select: Box::new(select),
            alias: String::from(alias),
        });
        self
    }

    /// Sets or clears DISTINCT.
    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    /// Sets the source table.
    pub fn from(&mut self, table: &str) -> &mut Self {
        self.from = Some(Source::Table(String::from(table)));
        self
    }

    /// Sets the source to an expression with placeholders, such as
    /// previously rendered subquery text with its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `sql`.
    pub fn from_expr(&mut self, sql: impl Into<String>, args: Vec<Arg>) -> Result<&mut Self> {
        self.from = Some(Source::Expr(Fragment::new(sql, args)?));
        Ok(self)
    }

    /// Sets the source to a parenthesized, aliased subquery.
    pub fn from_subquery(&mut self, select: Self, alias: &str) -> &mut Self {
        self.from = Some(Source::Subquery {
            select: Box::new(select),
            alias: String::from(alias),
        });
        self
    }

    fn push_join(
        &mut self,
        kind: JoinType,
        table: &str,
        on: impl Into<String>,
        args: Vec<Arg>,
    ) -> Result<&mut Self> {
        self.joins.push(Join {
            kind,
            table: String::from(table),
            on: Fragment::new(on, args)?,
        });
        Ok(self)
    }

    /// Adds an INNER JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `on`.
    pub fn join(&mut self, table: &str, on: impl Into<String>, args: Vec<Arg>) -> Result<&mut Self> {
        self.push_join(JoinType::Inner, table, on, args)
    }

    /// Adds a LEFT JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `on`.
    pub fn left_join(
        &mut self,
        table: &str,
        on: impl Into<String>,
        args: Vec<Arg>,
    ) -> Result<&mut Self> {
        self.push_join(JoinType::Left, table, on, args)
    }

    /// Adds a RIGHT JOIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `args` does not fill `on`.
    pub fn right_join(
        &mut self,
        table: &str,
        on: impl Into<String>,
        args: Vec<Arg>,
    ) -> Result<&mut Self> {
        self.push_join(JoinType::Right, table, on, args)
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

    /// Appends GROUP BY expressions.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by.extend(cols.iter().map(|c| String::from(*c)));
        self
    }

    /// ANDs a predicate into the HAVING clause.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] for raw SQL whose placeholders and
    /// arguments disagree.
    pub fn having(&mut self, predicate: impl IntoPredicate) -> Result<&mut Self> {
        self.having.push(predicate.into_predicate()?);
        Ok(self)
    }

    /// Appends an ORDER BY expression as written, e.g. `"id"` or
    /// `"created_at DESC"`.
    pub fn order_by(&mut self, expr: &str) -> &mut Self {
        self.order_by.push((String::from(expr), None));
        self
    }

    /// Appends an ascending ORDER BY column.
    pub fn order_by_asc(&mut self, col: &str) -> &mut Self {
        self.order_by
            .push((String::from(col), Some(OrderDirection::Asc)));
        self
    }

    /// Appends a descending ORDER BY column.
    pub fn order_by_desc(&mut self, col: &str) -> &mut Self {
        self.order_by
            .push((String::from(col), Some(OrderDirection::Desc)));
        self
    }

    /// Sets the LIMIT.
    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Sets the OFFSET.
    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// Removes the LIMIT.
    pub fn clear_limit(&mut self) -> &mut Self {
        self.limit = None;
        self
    }

    /// Removes the OFFSET.
    pub fn clear_offset(&mut self) -> &mut Self {
        self.offset = None;
        self
    }
}

impl Recycle for Select {
    fn recycle(&mut self) {
        self.distinct = false;
        self.columns.clear();
        self.from = None;
        self.joins.clear();
        self.where_clause.clear();
        self.group_by.clear();
        self.having.clear();
        self.order_by.clear();
        self.limit = None;
        self.offset = None;
    }
}

fn render_subquery(select: &Select, alias: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
    ctx.push("(");
    select.render_to(ctx)?;
    ctx.push(") AS ");
    ctx.write_name(alias)
}

impl Render for Select {
    fn kind(&self) -> &'static str {
        "SELECT"
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::MissingColumnList {
                statement: self.kind(),
            });
        }
        let Some(from) = &self.from else {
            return Err(Error::MissingTable {
                statement: self.kind(),
            });
        };

        ctx.push("SELECT ");
        if self.distinct {
            ctx.push("DISTINCT ");
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            match column {
                Projection::Name(name) => ctx.write_name(name)?,
                Projection::Expr(fragment) => ctx.write_fragment(fragment)?,
                Projection::Subquery { select, alias } => render_subquery(select, alias, ctx)?,
            }
        }

        ctx.push(" FROM ");
        match from {
            Source::Table(name) => ctx.write_name(name)?,
            Source::Expr(fragment) => ctx.write_fragment(fragment)?,
            Source::Subquery { select, alias } => render_subquery(select, alias, ctx)?,
        }

        for join in &self.joins {
            ctx.push(" ");
            ctx.push(join.kind.as_str());
            ctx.push(" ");
            ctx.write_name(&join.table)?;
            ctx.push(" ON ");
            ctx.write_fragment(&join.on)?;
        }

        if !self.where_clause.is_empty() {
            ctx.push(" WHERE ");
            Cond::render_conjunction(&self.where_clause, ctx)?;
        }

        if !self.group_by.is_empty() {
            ctx.push(" GROUP BY ");
            ctx.write_names(&self.group_by)?;
        }

        if !self.having.is_empty() {
            ctx.push(" HAVING ");
            Cond::render_conjunction(&self.having, ctx)?;
        }

        if !self.order_by.is_empty() {
            ctx.push(" ORDER BY ");
            for (i, (expr, direction)) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ctx.push(", ");
                }
                ctx.write_name(expr)?;
                if let Some(direction) = direction {
                    ctx.push(" ");
                    ctx.push(direction.as_str());
                }
            }
        }

        ctx.push_limit_offset(self.limit, self.offset);
        Ok(())
    }
}
