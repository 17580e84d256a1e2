//! Rendering statements into SQL text and bound arguments.
//!
//! Rendering is a pure function of the statement, the dialect and the
//! quoting policy: the same inputs always produce byte-identical SQL and an
//! equal argument list.
//!
//! ```rust
//! use sqlweave_core::dialect::PostgresDialect;
//! use sqlweave_core::render::{render, IdentQuoting};
//! use sqlweave_core::{args, Select};
//!
//! let mut select = Select::new();
//! select
//!     .column("id")
//!     .from("tickets")
//!     .where_clause(("subdomain_id = ? and (state = ? or state = ?)", args![1, "open", "spam"]))?;
//!
//! let rendered = render(&select, &PostgresDialect::new(), IdentQuoting::AsNeeded)?;
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT id FROM tickets WHERE subdomain_id = $1 and (state = $2 or state = $3)"
//! );
//! assert_eq!(rendered.args.len(), 3);
//! # Ok::<(), sqlweave_core::Error>(())
//! ```

mod context;
mod ident;

pub use context::RenderContext;
pub use ident::{is_bare, is_reserved, IdentQuoting};

use tracing::trace;

use crate::builder::value::SqlValue;
use crate::dialect::Dialect;
use crate::error::Result;

/// Trait for anything that can be written into a [`RenderContext`].
pub trait Render {
    /// Statement keyword used in logs and errors (`SELECT`, `INSERT`, ...).
    fn kind(&self) -> &'static str;

    /// Writes the SQL for `self`, binding arguments through `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the dialect cannot
    /// express the statement.
    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()>;
}

impl<T: Render + ?Sized> Render for &T {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        (**self).render_to(ctx)
    }
}

/// Final SQL text plus arguments in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    /// SQL text for the target dialect.
    pub sql: String,
    /// Bound values, positionally aligned with the placeholders in `sql`.
    pub args: Vec<SqlValue>,
}

impl Rendered {
    /// Consumes the output and returns `(sql, args)`.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }
}

/// Reusable output storage for [`render_into`].
///
/// The buffer keeps its capacity between renders so that a hot loop renders
/// without reallocating.
#[derive(Debug, Clone, Default)]
pub struct RenderBuffer {
    sql: String,
    args: Vec<SqlValue>,
}

impl RenderBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sql: String::new(),
            args: Vec::new(),
        }
    }

    /// Creates a buffer with room for `sql` bytes and `args` values.
    #[must_use]
    pub fn with_capacity(sql: usize, args: usize) -> Self {
        Self {
            sql: String::with_capacity(sql),
            args: Vec::with_capacity(args),
        }
    }

    /// Returns the rendered SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound arguments.
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// Returns true when nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Empties the buffer, keeping its capacity.
    pub fn clear(&mut self) {
        self.sql.clear();
        self.args.clear();
    }

    /// Copies the current contents into an owned [`Rendered`].
    #[must_use]
    pub fn to_rendered(&self) -> Rendered {
        Rendered {
            sql: self.sql.clone(),
            args: self.args.clone(),
        }
    }

    /// Moves the contents out, leaving the buffer empty.
    pub fn take(&mut self) -> Rendered {
        Rendered {
            sql: std::mem::take(&mut self.sql),
            args: std::mem::take(&mut self.args),
        }
    }
}

/// Renders `stmt` into `buf`, replacing its previous contents.
///
/// On error the buffer is left empty; a statement is never partially
/// rendered.
///
/// # Errors
///
/// Propagates the statement's render error.
pub fn render_into<R: Render + ?Sized>(
    stmt: &R,
    dialect: &dyn Dialect,
    quoting: IdentQuoting,
    buf: &mut RenderBuffer,
) -> Result<()> {
    buf.clear();
    let mut ctx = RenderContext::new(dialect, quoting, &mut buf.sql, &mut buf.args);
    if let Err(e) = stmt.render_to(&mut ctx) {
        buf.clear();
        return Err(e);
    }
    trace!(
        dialect = dialect.name(),
        statement = stmt.kind(),
        sql_len = buf.sql.len(),
        args = buf.args.len(),
        "rendered statement"
    );
    Ok(())
}

/// Renders `stmt` into a fresh [`Rendered`].
///
/// # Errors
///
/// Propagates the statement's render error.
pub fn render<R: Render + ?Sized>(
    stmt: &R,
    dialect: &dyn Dialect,
    quoting: IdentQuoting,
) -> Result<Rendered> {
    let mut buf = RenderBuffer::new();
    render_into(stmt, dialect, quoting, &mut buf)?;
    Ok(buf.take())
}
