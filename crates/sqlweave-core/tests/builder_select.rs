//! SELECT construction scenarios taken from real query-builder usage.

mod common;
use common::*;

use sqlweave_core::builder::IntoPredicate;
use sqlweave_core::dialect::{GenericDialect, PostgresDialect, SqliteDialect};
use sqlweave_core::{args, col, Cond, Eq, Error, Select, SqlBuilder, SqlValue};

fn tickets_query() -> Select {
    let mut select = Select::new();
    select
        .column("id")
        .from("tickets")
        .where_clause((
            "subdomain_id = ? and (state = ? or state = ?)",
            args![1, "open", "spam"],
        ))
        .unwrap();
    select
}

#[test]
fn simple_select_positional() {
    let rendered = sqlite(&tickets_query());
    assert_eq!(
        rendered.sql,
        "SELECT id FROM tickets WHERE subdomain_id = ? and (state = ? or state = ?)"
    );
    assert_eq!(
        rendered.args,
        vec![
            SqlValue::Int(1),
            SqlValue::Text(String::from("open")),
            SqlValue::Text(String::from("spam")),
        ]
    );
}

#[test]
fn simple_select_numbered() {
    let rendered = postgres(&tickets_query());
    assert_eq!(
        rendered.sql,
        "SELECT id FROM tickets WHERE subdomain_id = $1 and (state = $2 or state = $3)"
    );
    assert_eq!(rendered.args, sqlite(&tickets_query()).args);
}

#[test]
fn structured_equivalent_of_simple_select() {
    let mut select = Select::new();
    select
        .column("id")
        .from("tickets")
        .where_clause(
            col("subdomain_id")
                .eq(1)
                .and(col("state").eq("open").or(col("state").eq("spam"))),
        )
        .unwrap();
    assert_eq!(
        postgres(&select).sql,
        "SELECT id FROM tickets WHERE subdomain_id = $1 AND (state = $2 OR state = $3)"
    );
}

#[test]
fn conditional_assembly_skips_clauses() {
    fn build(state: Option<&str>, page: Option<u64>) -> String {
        let mut select = Select::new();
        select.columns(&["id", "title"]).from("tickets");
        if let Some(state) = state {
            select.where_clause(col("state").eq(state)).unwrap();
        }
        if let Some(page) = page {
            select.limit(20).offset(page * 20);
        }
        postgres(&select).sql
    }

    assert_eq!(build(None, None), "SELECT id, title FROM tickets");
    assert_eq!(
        build(Some("open"), None),
        "SELECT id, title FROM tickets WHERE state = $1"
    );
    assert_eq!(
        build(Some("open"), Some(2)),
        "SELECT id, title FROM tickets WHERE state = $1 LIMIT 20 OFFSET 40"
    );
}

#[test]
fn where_mixes_raw_map_and_structured() {
    let mut select = Select::new();
    select
        .columns(&["a", "b"])
        .from("c")
        .where_clause(("d = ? OR e = ?", args![1, "wat"]))
        .unwrap()
        .where_clause(Eq::new().with("f", 2).with("x", "hi"))
        .unwrap()
        .where_clause(col("g").in_list(vec![1, 2, 3]))
        .unwrap();
    let rendered = postgres(&select);
    assert_eq!(
        rendered.sql,
        "SELECT a, b FROM c WHERE (d = $1 OR e = $2) AND f = $3 AND x = $4 AND g IN ($5, $6, $7)"
    );
    assert_eq!(rendered.args.len(), 7);
}

#[test]
fn single_member_groups_do_not_leak_or() {
    let raw_or = ("a = ? OR b = ?", args![1, 2]).into_predicate().unwrap();
    let mut select = Select::new();
    select
        .column("id")
        .from("t")
        .where_clause(Cond::all([raw_or]))
        .unwrap()
        .where_clause(col("c").eq(3))
        .unwrap();
    assert_eq!(
        sqlite(&select).sql,
        "SELECT id FROM t WHERE (a = ? OR b = ?) AND c = ?"
    );

    let mut select = Select::new();
    select
        .column("id")
        .from("t")
        .where_clause(Cond::any([col("a").eq(1).or(col("b").eq(2))]))
        .unwrap()
        .having(col("c").eq(3))
        .unwrap()
        .having(Cond::all([col("d").eq(4).or(col("e").eq(5))]))
        .unwrap()
        .where_clause(col("c").eq(3))
        .unwrap();
    let rendered = postgres(&select);
    assert_eq!(
        rendered.sql,
        "SELECT id FROM t WHERE (a = $1 OR b = $2) AND c = $3 \
         HAVING c = $4 AND (d = $5 OR e = $6)"
    );
    assert_eq!(rendered.args.len(), 6);
}

#[test]
fn group_having_order_paging() {
    let mut select = Select::new();
    select
        .columns(&["a", "b"])
        .distinct(true)
        .from("c")
        .group_by(&["d"])
        .having(("SUM(e) > ?", args![100]))
        .unwrap()
        .order_by("f")
        .limit(10)
        .offset(20);
    assert_eq!(
        sqlite(&select).sql,
        "SELECT DISTINCT a, b FROM c GROUP BY d HAVING SUM(e) > ? ORDER BY f LIMIT 10 OFFSET 20"
    );
}

#[test]
fn offset_only_per_dialect() {
    let mut select = Select::new();
    select.column("id").from("t").offset(5);
    assert_eq!(sqlite(&select).sql, "SELECT id FROM t LIMIT -1 OFFSET 5");
    assert_eq!(postgres(&select).sql, "SELECT id FROM t OFFSET 5");
    assert_eq!(
        mysql(&select).sql,
        "SELECT id FROM t LIMIT 18446744073709551615 OFFSET 5"
    );
    assert_eq!(
        render_with(&select, &MSSQL_LIKE).sql,
        "SELECT id FROM t OFFSET 5 ROWS"
    );
}

#[test]
fn empty_conditions_are_valid() {
    let mut select = Select::new();
    select
        .column("id")
        .from("t")
        .where_clause(Cond::all(Vec::new()))
        .unwrap()
        .where_clause(col("a").in_list(Vec::<i64>::new()))
        .unwrap();
    let rendered = sqlite(&select);
    assert_eq!(rendered.sql, "SELECT id FROM t WHERE 1 = 1 AND 1 = 0");
    assert!(rendered.args.is_empty());
}

#[test]
fn arity_mismatch_is_reported_at_the_call() {
    let mut select = Select::new();
    assert_eq!(
        select.where_clause(("a = ?", args![])).unwrap_err(),
        Error::ArityMismatch {
            placeholders: 1,
            args: 0
        }
    );
    assert_eq!(
        select.having(("a", args![1])).unwrap_err(),
        Error::ArityMismatch {
            placeholders: 0,
            args: 1
        }
    );
    assert!(select.from_expr("x WHERE y = ?", args![]).is_err());
    assert!(select.column_expr("COALESCE(a, ?)", args![]).is_err());
}

#[test]
fn question_marks_in_literals_are_not_placeholders() {
    let mut select = Select::new();
    select
        .column("id")
        .from("faq")
        .where_clause(("title = 'why?' AND body LIKE ? -- really?", args!["%x%"]))
        .unwrap();
    let rendered = postgres(&select);
    assert_eq!(
        rendered.sql,
        "SELECT id FROM faq WHERE title = 'why?' AND body LIKE $1 -- really?"
    );
}

#[test]
fn escaped_question_mark_operator() {
    let mut select = Select::new();
    select
        .column("id")
        .from("docs")
        .where_clause(("data ?? ? AND id = ?", args!["tag", 3]))
        .unwrap();
    assert_eq!(
        postgres(&select).sql,
        "SELECT id FROM docs WHERE data ? $1 AND id = $2"
    );
}

#[test]
fn missing_required_fields() {
    let mut select = Select::new();
    select.from("t");
    assert_eq!(
        render_err(&select, &GenericDialect::new()),
        Error::MissingColumnList {
            statement: "SELECT"
        }
    );
}

#[test]
fn builder_entry_point_renders_for_every_dialect() {
    for dialect in all_dialects() {
        let sql = SqlBuilder::new(dialect.as_ref());
        let mut query = sql.select(&["id", "name"]);
        query
            .from("users")
            .where_clause(col("active").eq(true))
            .unwrap()
            .where_clause(col("age").between(18, 65))
            .unwrap()
            .order_by_desc("id")
            .limit(10);
        let rendered = query.build().unwrap();
        assert!(rendered.sql.starts_with("SELECT id, name FROM users WHERE active = "));
        assert_eq!(rendered.args.len(), 3);
        assert_parity(&rendered, dialect.as_ref());
    }
}

#[test]
fn rerender_is_deterministic() {
    let select = tickets_query();
    let dialect = PostgresDialect::new();
    assert_eq!(render_with(&select, &dialect), render_with(&select, &dialect));
    let sqlite_dialect = SqliteDialect::new();
    assert_eq!(
        render_with(&select, &sqlite_dialect),
        render_with(&select, &sqlite_dialect)
    );
}
