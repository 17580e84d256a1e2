//! # sqlweave-core
//!
//! A parameterized SQL statement builder with dialect-aware rendering.
//!
//! Statements (`SELECT`, `INSERT`, `UPDATE`, `DELETE`) are assembled through
//! chained `&mut self` calls in any order, then rendered for a [`Dialect`]
//! into SQL text plus the bound arguments in placeholder order.
//!
//! ## Building and rendering
//!
//! ```rust
//! use sqlweave_core::dialect::{PostgresDialect, SqliteDialect};
//! use sqlweave_core::{args, SqlBuilder};
//!
//! let sqlite = SqliteDialect::new();
//! let mut query = SqlBuilder::new(&sqlite).select(&["id"]);
//! query
//!     .from("tickets")
//!     .where_clause(("subdomain_id = ? and (state = ? or state = ?)", args![1, "open", "spam"]))?;
//!
//! let rendered = query.build()?;
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT id FROM tickets WHERE subdomain_id = ? and (state = ? or state = ?)"
//! );
//! assert_eq!(rendered.args.len(), 3);
//! # Ok::<(), sqlweave_core::Error>(())
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound, never spliced into the text. Raw predicates are
//! checked so that every `?` has exactly one argument:
//!
//! ```rust
//! use sqlweave_core::{args, col, Error, Select};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let mut select = Select::new();
//! select.column("id").from("users").where_clause(col("name").eq(user_input))?;
//!
//! let err = select.where_clause(("a = ? AND b = ?", args![1])).unwrap_err();
//! assert_eq!(err, Error::ArityMismatch { placeholders: 2, args: 1 });
//! # Ok::<(), sqlweave_core::Error>(())
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod pool;
pub mod query;
pub mod render;

pub use builder::{
    col, raw, Arg, Cond, Delete, Eq, Fragment, Insert, Raw, Select, SqlValue, Statement,
    ToSqlValue, Update,
};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use pool::{Pool, PoolConfig, Pooled, Recycle};
pub use query::{Query, SqlBuilder};
pub use render::{IdentQuoting, Render, RenderBuffer, Rendered};
