//! Statement builders.
//!
//! Each statement is a plain value mutated in place through `&mut self`
//! methods that return `&mut Self`, so clauses can be chained or added
//! conditionally in any order. Methods that take raw SQL with placeholders
//! return a `Result` and reject a placeholder/argument mismatch immediately.
//!
//! # Example
//!
//! ```rust
//! use sqlweave_core::builder::{col, Select};
//! use sqlweave_core::dialect::GenericDialect;
//! use sqlweave_core::render::{render, IdentQuoting};
//!
//! let mut select = Select::new();
//! select
//!     .columns(&["id", "name"])
//!     .from("users")
//!     .where_clause(col("active").eq(true))?;
//!
//! let rendered = render(&select, &GenericDialect::new(), IdentQuoting::AsNeeded)?;
//! assert_eq!(rendered.sql, "SELECT id, name FROM users WHERE active = ?");
//! # Ok::<(), sqlweave_core::Error>(())
//! ```

mod delete;
mod expr;
mod fragment;
mod insert;
mod select;
mod statement;
mod update;
pub mod value;

pub use delete::Delete;
pub use expr::{col, Column, CompareOp, Cond, Eq, IntoPredicate};
pub use fragment::Fragment;
pub use insert::Insert;
pub use select::{JoinType, OrderDirection, Select};
pub use statement::Statement;
pub use update::Update;
pub use value::{raw, Arg, Raw, SqlValue, ToSqlValue};
