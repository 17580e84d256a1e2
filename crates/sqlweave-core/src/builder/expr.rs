//! Predicate construction for WHERE and HAVING.
//!
//! A predicate is either caller SQL with `?` placeholders (a [`Fragment`]) or
//! a structured [`Cond`] built from column comparisons. Structured predicates
//! quote bare column names through the dialect and bind every value.

use indexmap::IndexMap;

use super::fragment::Fragment;
use super::value::{Arg, SqlValue, ToSqlValue};
use crate::error::Result;
use crate::render::{Render, RenderContext};

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        table: None,
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

/// Comparison operators usable in a [`Cond::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl CompareOp {
    /// Returns the SQL spelling of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

impl Column {
    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match &self.table {
            Some(t) => format!("{t}.{}", self.name),
            None => self.name.clone(),
        }
    }

    fn compare(self, op: CompareOp, value: impl Into<Arg>) -> Cond {
        Cond::Compare {
            column: self.to_sql(),
            op,
            value: value.into(),
        }
    }

    /// Creates an equality expression. NULL renders as `IS NULL`.
    #[must_use]
    pub fn eq(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::Eq, value)
    }

    /// Creates an inequality expression. NULL renders as `IS NOT NULL`.
    #[must_use]
    pub fn not_eq(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::NotEq, value)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::Lt, value)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::LtEq, value)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::Gt, value)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, value: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::GtEq, value)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like(self, pattern: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::Like, pattern)
    }

    /// Creates a NOT LIKE expression.
    #[must_use]
    pub fn not_like(self, pattern: impl Into<Arg>) -> Cond {
        self.compare(CompareOp::NotLike, pattern)
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Cond {
        Cond::Null {
            column: self.to_sql(),
            negated: false,
        }
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Cond {
        Cond::Null {
            column: self.to_sql(),
            negated: true,
        }
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: impl Into<Arg>, high: impl Into<Arg>) -> Cond {
        Cond::Between {
            column: self.to_sql(),
            low: low.into(),
            high: high.into(),
            negated: false,
        }
    }

    /// Creates a NOT BETWEEN expression.
    #[must_use]
    pub fn not_between(self, low: impl Into<Arg>, high: impl Into<Arg>) -> Cond {
        Cond::Between {
            column: self.to_sql(),
            low: low.into(),
            high: high.into(),
            negated: true,
        }
    }

    /// Creates an IN expression. An empty list matches nothing.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Cond {
        Cond::In {
            column: self.to_sql(),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: false,
        }
    }

    /// Creates a NOT IN expression. An empty list matches everything.
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(self, values: Vec<T>) -> Cond {
        Cond::In {
            column: self.to_sql(),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: true,
        }
    }
}

/// A structured boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    /// `column <op> value`.
    Compare {
        /// Column name or expression.
        column: String,
        /// Operator.
        op: CompareOp,
        /// Right-hand side.
        value: Arg,
    },
    /// `column IS [NOT] NULL`.
    Null {
        /// Column name or expression.
        column: String,
        /// `IS NOT NULL` when set.
        negated: bool,
    },
    /// `column [NOT] IN (...)`.
    In {
        /// Column name or expression.
        column: String,
        /// Candidate values.
        values: Vec<SqlValue>,
        /// `NOT IN` when set.
        negated: bool,
    },
    /// `column [NOT] BETWEEN low AND high`.
    Between {
        /// Column name or expression.
        column: String,
        /// Lower bound.
        low: Arg,
        /// Upper bound.
        high: Arg,
        /// `NOT BETWEEN` when set.
        negated: bool,
    },
    /// All members hold. Empty is always true.
    And(Vec<Cond>),
    /// Any member holds. Empty is always false.
    Or(Vec<Cond>),
    /// `NOT (...)`.
    Not(Box<Cond>),
    /// Caller SQL with placeholders.
    Sql(Fragment),
}

impl Cond {
    /// Conjunction of all conditions.
    #[must_use]
    pub fn all(conds: impl IntoIterator<Item = Self>) -> Self {
        Self::And(conds.into_iter().collect())
    }

    /// Disjunction of all conditions.
    #[must_use]
    pub fn any(conds: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(conds.into_iter().collect())
    }

    /// Creates an AND expression, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut conds) => {
                conds.push(other);
                Self::And(conds)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Creates an OR expression, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut conds) => {
                conds.push(other);
                Self::Or(conds)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negates the expression with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Returns true if this member must be parenthesized when it sits next to
    /// siblings joined by AND (or, with `in_or`, by OR).
    fn needs_parens(&self, in_or: bool) -> bool {
        match self {
            Self::Sql(_) => true,
            // A one-member group renders as its member.
            Self::And(conds) | Self::Or(conds) if conds.len() == 1 => {
                conds.iter().any(|c| c.needs_parens(in_or))
            }
            Self::Or(conds) => !in_or && conds.len() > 1,
            Self::And(conds) => in_or && conds.len() > 1,
            _ => false,
        }
    }

    fn render_joined(
        conds: &[Self],
        separator: &str,
        in_or: bool,
        ctx: &mut RenderContext<'_>,
    ) -> Result<()> {
        if let [only] = conds {
            return only.render_to(ctx);
        }
        for (i, cond) in conds.iter().enumerate() {
            if i > 0 {
                ctx.push(separator);
            }
            if cond.needs_parens(in_or) {
                ctx.push("(");
                cond.render_to(ctx)?;
                ctx.push(")");
            } else {
                cond.render_to(ctx)?;
            }
        }
        Ok(())
    }

    /// Writes an implicit conjunction of predicates (a WHERE or HAVING body).
    pub(crate) fn render_conjunction(conds: &[Self], ctx: &mut RenderContext<'_>) -> Result<()> {
        Self::render_joined(conds, " AND ", false, ctx)
    }
}

impl Render for Cond {
    fn kind(&self) -> &'static str {
        "CONDITION"
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        match self {
            Self::Compare { column, op, value } => {
                ctx.write_name(column)?;
                match (op, value) {
                    (CompareOp::Eq, Arg::Value(SqlValue::Null)) => ctx.push(" IS NULL"),
                    (CompareOp::NotEq, Arg::Value(SqlValue::Null)) => ctx.push(" IS NOT NULL"),
                    _ => {
                        ctx.push(" ");
                        ctx.push(op.as_str());
                        ctx.push(" ");
                        ctx.write_arg(value)?;
                    }
                }
            }
            Self::Null { column, negated } => {
                ctx.write_name(column)?;
                ctx.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Self::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    ctx.push(if *negated { "1 = 1" } else { "1 = 0" });
                    return Ok(());
                }
                ctx.write_name(column)?;
                ctx.push(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        ctx.push(", ");
                    }
                    ctx.bind(value);
                }
                ctx.push(")");
            }
            Self::Between {
                column,
                low,
                high,
                negated,
            } => {
                ctx.write_name(column)?;
                ctx.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                ctx.write_arg(low)?;
                ctx.push(" AND ");
                ctx.write_arg(high)?;
            }
            Self::And(conds) if conds.is_empty() => ctx.push("1 = 1"),
            Self::Or(conds) if conds.is_empty() => ctx.push("1 = 0"),
            Self::And(conds) => Self::render_joined(conds, " AND ", false, ctx)?,
            Self::Or(conds) => Self::render_joined(conds, " OR ", true, ctx)?,
            Self::Not(inner) => {
                ctx.push("NOT (");
                inner.render_to(ctx)?;
                ctx.push(")");
            }
            Self::Sql(fragment) => ctx.write_fragment(fragment)?,
        }
        Ok(())
    }
}

/// An insertion-ordered equality mapping: each entry renders as
/// `column = ?`, entries AND-joined in insertion order.
///
/// Inserting a column that is already present replaces its value in place.
///
/// ```rust
/// use sqlweave_core::builder::Eq;
///
/// let eq = Eq::new().with("f", 2).with("x", "hi");
/// assert_eq!(eq.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Eq {
    entries: IndexMap<String, Arg>,
}

impl Eq {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.insert(column, value);
        self
    }

    /// Adds or replaces an entry, returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Arg>) -> Option<Arg> {
        self.entries.insert(column.into(), value.into())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for Eq {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut eq = Self::new();
        for (column, value) in iter {
            eq.insert(column, value);
        }
        eq
    }
}

impl From<Eq> for Cond {
    fn from(eq: Eq) -> Self {
        Self::And(
            eq.entries
                .into_iter()
                .map(|(column, value)| Self::Compare {
                    column,
                    op: CompareOp::Eq,
                    value,
                })
                .collect(),
        )
    }
}

/// Conversion into a WHERE/HAVING predicate.
///
/// Implemented for structured conditions and for caller SQL, with or without
/// arguments: `"j = k"`, `("jj = ?", args![1])`, [`Eq`], [`Cond`].
pub trait IntoPredicate {
    /// Converts `self` into a condition.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ArityMismatch`] for SQL whose placeholder count
    /// differs from its argument count.
    fn into_predicate(self) -> Result<Cond>;
}

impl IntoPredicate for Cond {
    fn into_predicate(self) -> Result<Cond> {
        Ok(self)
    }
}

impl IntoPredicate for Eq {
    fn into_predicate(self) -> Result<Cond> {
        Ok(self.into())
    }
}

impl IntoPredicate for Fragment {
    fn into_predicate(self) -> Result<Cond> {
        Ok(Cond::Sql(self))
    }
}

impl IntoPredicate for &str {
    fn into_predicate(self) -> Result<Cond> {
        Fragment::text(self).map(Cond::Sql)
    }
}

impl IntoPredicate for String {
    fn into_predicate(self) -> Result<Cond> {
        Fragment::text(self).map(Cond::Sql)
    }
}

impl<S: Into<String>> IntoPredicate for (S, Vec<Arg>) {
    fn into_predicate(self) -> Result<Cond> {
        Fragment::new(self.0, self.1).map(Cond::Sql)
    }
}
