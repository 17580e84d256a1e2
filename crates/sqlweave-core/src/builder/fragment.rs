//! Raw SQL text paired with positional arguments.

use tracing::debug;

use super::value::Arg;
use crate::error::{Error, Result};
use crate::lexer::{Mark, MarkKind, Scanner};

/// Caller-supplied SQL text with `?` placeholders and the arguments that
/// fill them, in order.
///
/// The placeholder count is checked once, at construction; a fragment that
/// exists always has exactly one argument per placeholder. The text is kept
/// verbatim and the marks are remembered so rendering never rescans.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    sql: String,
    marks: Vec<Mark>,
    args: Vec<Arg>,
}

impl Fragment {
    /// Creates a fragment, rejecting a placeholder/argument count mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] when the number of `?` placeholders in
    /// `sql` differs from `args.len()`.
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Result<Self> {
        let sql = sql.into();
        let marks = Scanner::new(&sql).scan();
        let placeholders = marks
            .iter()
            .filter(|m| m.kind == MarkKind::Placeholder)
            .count();
        if placeholders != args.len() {
            debug!(
                placeholders,
                args = args.len(),
                "rejected SQL fragment with mismatched arguments"
            );
            return Err(Error::ArityMismatch {
                placeholders,
                args: args.len(),
            });
        }
        Ok(Self { sql, marks, args })
    }

    /// Creates a fragment that takes no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `sql` contains a placeholder.
    pub fn text(sql: impl Into<String>) -> Result<Self> {
        Self::new(sql, Vec::new())
    }

    /// Returns the SQL text as supplied.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the arguments in placeholder order.
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub(crate) fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Returns true when the fragment has no marks to rewrite.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_matching_arity() {
        let fragment = Fragment::new(
            "subdomain_id = ? and (state = ? or state = ?)",
            args![1, "open", "spam"],
        )
        .unwrap();
        assert_eq!(fragment.args().len(), 3);
        assert_eq!(fragment.marks().len(), 3);
        assert!(!fragment.is_plain());
    }

    #[test]
    fn test_too_few_args() {
        let err = Fragment::new("a = ? AND b = ?", args![1]).unwrap_err();
        assert_eq!(
            err,
            Error::ArityMismatch {
                placeholders: 2,
                args: 1
            }
        );
    }

    #[test]
    fn test_too_many_args() {
        assert!(Fragment::text("j = k").is_ok());
        let err = Fragment::new("j = k", args![1]).unwrap_err();
        assert_eq!(
            err,
            Error::ArityMismatch {
                placeholders: 0,
                args: 1
            }
        );
    }

    #[test]
    fn test_escaped_question_needs_no_arg() {
        let fragment = Fragment::new("data ?? 'k' AND id = ?", args![3]).unwrap();
        assert_eq!(fragment.marks().len(), 2);
        assert_eq!(fragment.args().len(), 1);
    }

    #[test]
    fn test_injection_text_stays_an_argument() {
        let malicious = "'; DROP TABLE users; --";
        let fragment = Fragment::new("name = ?", args![malicious]).unwrap();
        assert_eq!(fragment.sql(), "name = ?");
        assert_eq!(fragment.args(), &[Arg::from(malicious)]);
    }
}
