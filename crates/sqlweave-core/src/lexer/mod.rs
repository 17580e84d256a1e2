//! Lexical scanning of caller-supplied SQL text.
//!
//! Raw predicates and expressions are never parsed. The scanner only locates
//! `?` placeholders so that they can be matched positionally with their
//! arguments and rewritten into the dialect's placeholder syntax.

mod scanner;
mod span;

pub use scanner::{Mark, MarkKind, Scanner};
pub use span::Span;
