#![allow(dead_code)]

use sqlweave_core::dialect::{
    CustomDialect, Dialect, GenericDialect, LimitSyntax, MySqlDialect, PlaceholderStyle,
    PostgresDialect, SqliteDialect,
};
use sqlweave_core::lexer::Scanner;
use sqlweave_core::render::render;
use sqlweave_core::{Error, IdentQuoting, Render, Rendered};

pub const MSSQL_LIKE: CustomDialect = CustomDialect::new("mssql-like")
    .with_placeholder(PlaceholderStyle::Colon)
    .with_quotes('[', ']')
    .with_limit_syntax(LimitSyntax::OffsetFetch)
    .with_dml_limit(false);

pub fn all_dialects() -> Vec<Box<dyn Dialect>> {
    vec![
        Box::new(GenericDialect::new()),
        Box::new(SqliteDialect::new()),
        Box::new(PostgresDialect::new()),
        Box::new(MySqlDialect::new()),
        Box::new(MSSQL_LIKE),
    ]
}

pub fn render_with<R: Render + ?Sized>(stmt: &R, dialect: &dyn Dialect) -> Rendered {
    render(stmt, dialect, IdentQuoting::AsNeeded)
        .unwrap_or_else(|e| panic!("Failed to render {} for {}: {e}", stmt.kind(), dialect.name()))
}

pub fn render_err<R: Render + ?Sized>(stmt: &R, dialect: &dyn Dialect) -> Error {
    match render(stmt, dialect, IdentQuoting::AsNeeded) {
        Ok(r) => panic!("Expected render error for {}, got {:?}", dialect.name(), r.sql),
        Err(e) => e,
    }
}

pub fn sqlite<R: Render + ?Sized>(stmt: &R) -> Rendered {
    render_with(stmt, &SqliteDialect::new())
}

pub fn postgres<R: Render + ?Sized>(stmt: &R) -> Rendered {
    render_with(stmt, &PostgresDialect::new())
}

pub fn mysql<R: Render + ?Sized>(stmt: &R) -> Rendered {
    render_with(stmt, &MySqlDialect::new())
}

/// Indices of numbered placeholders (`$n` or `:n`) in order of appearance.
pub fn numbered_placeholders(sql: &str, prefix: char) -> Vec<usize> {
    let mut found = Vec::new();
    let mut chars = sql.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != prefix {
            continue;
        }
        let mut n = 0usize;
        let mut digits = 0;
        while let Some(&(_, d)) = chars.peek() {
            let Some(v) = d.to_digit(10) else { break };
            n = n * 10 + v as usize;
            digits += 1;
            chars.next();
        }
        if digits > 0 {
            found.push(n);
        }
    }
    found
}

/// Counts the placeholders a dialect emitted into `sql`.
pub fn count_placeholders(sql: &str, dialect: &dyn Dialect) -> usize {
    match dialect.placeholder_style() {
        PlaceholderStyle::Question => Scanner::count_placeholders(sql),
        PlaceholderStyle::Dollar => numbered_placeholders(sql, '$').len(),
        PlaceholderStyle::Colon => numbered_placeholders(sql, ':').len(),
    }
}

/// Asserts placeholder/argument parity and, for numbered dialects, that
/// indices run 1..=n left to right.
pub fn assert_parity(rendered: &Rendered, dialect: &dyn Dialect) {
    assert_eq!(
        count_placeholders(&rendered.sql, dialect),
        rendered.args.len(),
        "parity broken for {}: {}",
        dialect.name(),
        rendered.sql
    );
    let prefix = match dialect.placeholder_style() {
        PlaceholderStyle::Question => return,
        PlaceholderStyle::Dollar => '$',
        PlaceholderStyle::Colon => ':',
    };
    let expected: Vec<usize> = (1..=rendered.args.len()).collect();
    assert_eq!(numbered_placeholders(&rendered.sql, prefix), expected);
}
