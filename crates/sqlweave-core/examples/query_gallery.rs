//! Renders the statements a typical query-builder benchmark exercises, for
//! each built-in dialect.
//!
//! Run with `cargo run --example query_gallery`.

use sqlweave_core::dialect::{Dialect, MySqlDialect, PostgresDialect, SqliteDialect};
use sqlweave_core::{
    args, col, raw, Eq, Insert, Pool, RenderBuffer, Result, Select, SqlBuilder, Update,
};

fn show(label: &str, buf: &RenderBuffer) {
    println!("{label:<18} {}", buf.sql());
    println!("{:<18} {:?}", "", buf.args());
}

fn gallery(dialect: &dyn Dialect) -> Result<()> {
    let sql = SqlBuilder::new(dialect);
    let mut buf = RenderBuffer::with_capacity(256, 16);
    println!("== {} ==", dialect.name());

    let mut select = sql.select(&["id"]);
    select.from("tickets").where_clause((
        "subdomain_id = ? and (state = ? or state = ?)",
        args![1, "open", "spam"],
    ))?;
    select.build_into(&mut buf)?;
    show("select", &buf);

    let mut select = sql.select(&["a", "b", "z", "y", "x"]);
    select
        .distinct(true)
        .from("c")
        .where_clause(("d = ? OR e = ?", args![1, "wat"]))?
        .where_clause(Eq::new().with("f", 2).with("x", "hi"))?
        .group_by(&["i"])
        .having(("j = k", args![]))?
        .order_by("l")
        .limit(7)
        .offset(8);
    select.build_into(&mut buf)?;
    show("select complex", &buf);

    let mut inner = Select::new();
    inner
        .column("id")
        .from("tickets")
        .where_clause(col("subdomain_id").eq(1))?;
    let mut select = sql.select(&["id", "title"]);
    select
        .from_subquery(inner, "subq")
        .where_clause(col("state").in_list(vec!["open", "spam"]))?;
    select.build_into(&mut buf)?;
    show("select subquery", &buf);

    let mut insert = sql.insert_into("mytable");
    insert
        .columns(&["id", "a", "b", "price", "created", "updated"])
        .values(args![1, "foo", true, 100.05, raw("CURRENT_TIMESTAMP"), raw("CURRENT_TIMESTAMP")])?;
    insert.build_into(&mut buf)?;
    show("insert", &buf);

    let mut update = sql.update("mytable");
    update
        .set("foo", 1)?
        .set_raw("bar", "COALESCE(bar, 0) + 1")?
        .where_clause(("id = ?", args![9]))?;
    update.build_into(&mut buf)?;
    show("update", &buf);

    let mut delete = sql.delete_from("tickets");
    delete.where_clause(col("id").eq(1))?;
    if dialect.supports_dml_limit() {
        delete.limit(1);
    }
    delete.build_into(&mut buf)?;
    show("delete", &buf);

    Ok(())
}

fn pooled(dialect: &dyn Dialect) -> Result<()> {
    let sql = SqlBuilder::new(dialect);
    let updates: Pool<Update> = Pool::new();
    let inserts: Pool<Insert> = Pool::new();
    let mut buf = RenderBuffer::new();

    for id in 0..3 {
        let mut update = sql.acquire_update(&updates, "counters");
        update.set("hits", raw("hits + 1"))?.where_clause(col("id").eq(id))?;
        update.build_into(&mut buf)?;
        show("pooled update", &buf);

        let mut insert = sql.acquire_insert(&inserts, "events");
        insert.set("counter_id", id)?.set("kind", "hit")?;
        insert.build_into(&mut buf)?;
        show("pooled insert", &buf);
    }
    println!("idle: {} update, {} insert", updates.idle(), inserts.idle());
    Ok(())
}

fn main() -> Result<()> {
    let dialects: [&dyn Dialect; 3] = [
        &SqliteDialect::new(),
        &PostgresDialect::new(),
        &MySqlDialect::new(),
    ];
    for dialect in dialects {
        gallery(dialect)?;
        println!();
    }
    pooled(&PostgresDialect::new())
}
