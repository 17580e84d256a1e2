//! Error types for statement building and rendering.

/// Errors raised while building or rendering a statement.
///
/// Arity errors are reported by the mutator that received the bad input;
/// missing-field and dialect errors are reported by render. A statement that
/// fails to render leaves the output buffer empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A raw SQL fragment has a different number of `?` placeholders than
    /// supplied arguments.
    #[error("SQL fragment has {placeholders} placeholder(s) but {args} argument(s) were supplied")]
    ArityMismatch {
        /// Placeholders found by the lexical scan.
        placeholders: usize,
        /// Arguments supplied by the caller.
        args: usize,
    },

    /// An INSERT row has a different length than the column list.
    #[error("INSERT row {row} has {found} value(s) but {expected} column(s) are declared")]
    RowArityMismatch {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// The statement has no target table.
    #[error("{statement} statement has no target table")]
    MissingTable {
        /// Statement kind (`SELECT`, `INSERT`, ...).
        statement: &'static str,
    },

    /// SELECT without any output column.
    #[error("{statement} statement has no output columns")]
    MissingColumnList {
        /// Statement kind.
        statement: &'static str,
    },

    /// INSERT without a column list.
    #[error("INSERT statement has no columns")]
    MissingColumns,

    /// INSERT without any value row.
    #[error("INSERT statement has no value rows")]
    MissingValues,

    /// UPDATE without any SET assignment.
    #[error("UPDATE statement has no SET assignments")]
    MissingAssignments,

    /// The statement uses a feature the dialect cannot express.
    #[error("dialect '{dialect}' does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: String,
        /// Feature that was requested.
        feature: &'static str,
    },

    /// An identifier is empty or contains a NUL character.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Result type alias for builder and render operations.
pub type Result<T> = std::result::Result<T, Error>;
