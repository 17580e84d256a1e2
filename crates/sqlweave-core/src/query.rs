//! Dialect-bound entry points.
//!
//! A [`SqlBuilder`] pairs a dialect with a quoting policy and hands out
//! [`Query`] handles, so callers pick the dialect once and then call
//! `build()` without repeating it.
//!
//! ```rust
//! use sqlweave_core::dialect::PostgresDialect;
//! use sqlweave_core::{args, SqlBuilder};
//!
//! let dialect = PostgresDialect::new();
//! let sql = SqlBuilder::new(&dialect);
//!
//! let mut query = sql.select(&["id"]);
//! query
//!     .from("tickets")
//!     .where_clause(("subdomain_id = ? and (state = ? or state = ?)", args![1, "open", "spam"]))?;
//! let rendered = query.build()?;
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT id FROM tickets WHERE subdomain_id = $1 and (state = $2 or state = $3)"
//! );
//! # Ok::<(), sqlweave_core::Error>(())
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::builder::{Delete, Insert, Select, Update};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::pool::{Pool, Pooled};
use crate::render::{self, IdentQuoting, Render, RenderBuffer, Rendered};

/// Statement factory bound to one dialect.
#[derive(Clone, Copy)]
pub struct SqlBuilder<'d> {
    dialect: &'d dyn Dialect,
    quoting: IdentQuoting,
}

impl fmt::Debug for SqlBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlBuilder")
            .field("dialect", &self.dialect.name())
            .field("quoting", &self.quoting)
            .finish()
    }
}

impl<'d> SqlBuilder<'d> {
    /// Creates a builder with [`IdentQuoting::AsNeeded`].
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            quoting: IdentQuoting::default(),
        }
    }

    /// Replaces the identifier quoting policy.
    #[must_use]
    pub const fn with_quoting(mut self, quoting: IdentQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Returns the bound dialect.
    #[must_use]
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Returns the quoting policy.
    #[must_use]
    pub const fn quoting(&self) -> IdentQuoting {
        self.quoting
    }

    const fn wrap<S>(self, stmt: S) -> Query<'d, S> {
        Query {
            builder: self,
            stmt,
        }
    }

    /// Starts a SELECT of `cols`.
    #[must_use]
    pub fn select(&self, cols: &[&str]) -> Query<'d, Select> {
        let mut select = Select::new();
        select.columns(cols);
        self.wrap(select)
    }

    /// Starts an INSERT into `table`.
    #[must_use]
    pub fn insert_into(&self, table: &str) -> Query<'d, Insert> {
        self.wrap(Insert::new(table))
    }

    /// Starts an UPDATE of `table`.
    #[must_use]
    pub fn update(&self, table: &str) -> Query<'d, Update> {
        self.wrap(Update::new(table))
    }

    /// Starts a DELETE from `table`.
    #[must_use]
    pub fn delete_from(&self, table: &str) -> Query<'d, Delete> {
        self.wrap(Delete::new(table))
    }

    /// Starts a SELECT backed by a pooled statement.
    #[must_use]
    pub fn acquire_select<'p>(
        &self,
        pool: &'p Pool<Select>,
        cols: &[&str],
    ) -> Query<'d, Pooled<'p, Select>> {
        let mut select = pool.acquire();
        select.columns(cols);
        self.wrap(select)
    }

    /// Starts an INSERT backed by a pooled statement.
    #[must_use]
    pub fn acquire_insert<'p>(
        &self,
        pool: &'p Pool<Insert>,
        table: &str,
    ) -> Query<'d, Pooled<'p, Insert>> {
        let mut insert = pool.acquire();
        insert.table(table);
        self.wrap(insert)
    }

    /// Starts an UPDATE backed by a pooled statement.
    #[must_use]
    pub fn acquire_update<'p>(
        &self,
        pool: &'p Pool<Update>,
        table: &str,
    ) -> Query<'d, Pooled<'p, Update>> {
        let mut update = pool.acquire();
        update.table(table);
        self.wrap(update)
    }

    /// Starts a DELETE backed by a pooled statement.
    #[must_use]
    pub fn acquire_delete<'p>(
        &self,
        pool: &'p Pool<Delete>,
        table: &str,
    ) -> Query<'d, Pooled<'p, Delete>> {
        let mut delete = pool.acquire();
        delete.table(table);
        self.wrap(delete)
    }

    /// Renders any statement with this builder's dialect.
    ///
    /// # Errors
    ///
    /// Propagates the statement's render error.
    pub fn render<R: Render + ?Sized>(&self, stmt: &R) -> Result<Rendered> {
        render::render(stmt, self.dialect, self.quoting)
    }

    /// Renders any statement into a reusable buffer.
    ///
    /// # Errors
    ///
    /// Propagates the statement's render error; `buf` is left empty.
    pub fn render_into<R: Render + ?Sized>(&self, stmt: &R, buf: &mut RenderBuffer) -> Result<()> {
        render::render_into(stmt, self.dialect, self.quoting, buf)
    }
}

/// A statement together with the builder that renders it.
///
/// Dereferences to the statement, so every statement mutator is available
/// directly on the handle.
#[derive(Debug)]
pub struct Query<'d, S> {
    builder: SqlBuilder<'d>,
    stmt: S,
}

impl<'d, S> Query<'d, S> {
    /// Returns the builder this query renders with.
    #[must_use]
    pub const fn builder(&self) -> SqlBuilder<'d> {
        self.builder
    }

    /// Unwraps the statement.
    pub fn into_inner(self) -> S {
        self.stmt
    }
}

impl<S: Render> Query<'_, S> {
    /// Renders the statement.
    ///
    /// # Errors
    ///
    /// Propagates the statement's render error.
    pub fn build(&self) -> Result<Rendered> {
        self.builder.render(&self.stmt)
    }

    /// Renders the statement into a reusable buffer.
    ///
    /// # Errors
    ///
    /// Propagates the statement's render error; `buf` is left empty.
    pub fn build_into(&self, buf: &mut RenderBuffer) -> Result<()> {
        self.builder.render_into(&self.stmt, buf)
    }
}

impl<S> Deref for Query<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.stmt
    }
}

impl<S> DerefMut for Query<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.stmt
    }
}
