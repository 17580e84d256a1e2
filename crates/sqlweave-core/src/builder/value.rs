//! SQL values and parameter handling.
//!
//! Values are never spliced into SQL text. A [`SqlValue`] always travels out
//! of band as a bound parameter; only an explicit [`Raw`] fragment is written
//! into the statement text.

use crate::error::{Error, Result};
use crate::lexer::Scanner;

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns true for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

// Lossless widening into the 64-bit variants.
macro_rules! impl_to_sql_widening {
    ($variant:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl ToSqlValue for $t {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(<$wide>::from(self))
                }
            }
        )+
    };
}

impl_to_sql_widening!(Int, i64: i32, i16, i8, u32, u16, u8);
impl_to_sql_widening!(Float, f64: f32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

/// Literal SQL text that is written into the statement as-is.
///
/// Used when the database should evaluate an expression itself, e.g.
/// `COALESCE(bar, 0) + 1`. The text is never quoted or escaped, so it must not
/// contain user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

/// Creates a [`Raw`] SQL fragment.
#[must_use]
pub fn raw(sql: impl Into<String>) -> Raw {
    Raw(sql.into())
}

/// A statement argument: either a bound value or literal SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Bound out of band; consumes one placeholder.
    Value(SqlValue),
    /// Written into the text; consumes no placeholder.
    Raw(String),
}

impl Arg {
    /// Returns the bound value, if this is not a raw fragment.
    #[must_use]
    pub const fn as_value(&self) -> Option<&SqlValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Raw(_) => None,
        }
    }

    /// Returns true if this argument is written into the text.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Rejects raw text with a placeholder: nothing would be bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if raw text contains a lone `?`.
    pub fn check(&self) -> Result<()> {
        let Self::Raw(sql) = self else {
            return Ok(());
        };
        match Scanner::count_placeholders(sql) {
            0 => Ok(()),
            placeholders => Err(Error::ArityMismatch {
                placeholders,
                args: 0,
            }),
        }
    }
}

impl From<Raw> for Arg {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw.0)
    }
}

macro_rules! impl_arg_from_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Self::Value(value.to_sql_value())
                }
            }
        )*
    };
}

impl_arg_from_value!(SqlValue, bool, i64, i32, i16, i8, u32, u16, u8, f64, f32, String, Vec<u8>);

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl<T: ToSqlValue> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

/// Builds a `Vec<Arg>` from heterogeneous values.
///
/// ```rust
/// use sqlweave_core::{args, raw, Arg};
///
/// let args: Vec<Arg> = args![1, "open", raw("NOW()")];
/// assert_eq!(args.len(), 3);
/// assert!(args[2].is_raw());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}
