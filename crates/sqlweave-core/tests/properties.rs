//! Property tests: placeholder/argument parity, determinism and clause
//! ordering invariance over generated SELECT statements.

mod common;
use common::*;

use proptest::collection::vec;
use proptest::prelude::*;
use sqlweave_core::builder::IntoPredicate;
use sqlweave_core::{col, Arg, Cond, Select, Update};

#[derive(Debug, Clone)]
enum Pred {
    Raw(Vec<i64>),
    Eq(String, i64),
    In(String, Vec<i64>),
    Or(String, i64, i64),
}

impl Pred {
    fn to_cond(&self) -> Cond {
        match self {
            Self::Raw(values) => {
                let sql = if values.is_empty() {
                    String::from("1 = 1")
                } else {
                    (0..values.len())
                        .map(|i| format!("r{i} = ?"))
                        .collect::<Vec<_>>()
                        .join(" AND ")
                };
                let args: Vec<Arg> = values.iter().copied().map(Arg::from).collect();
                (sql, args).into_predicate().unwrap()
            }
            Self::Eq(column, v) => col(column).eq(*v),
            Self::In(column, values) => col(column).in_list(values.clone()),
            Self::Or(column, a, b) => col(column).eq(*a).or(col(column).gt(*b)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Clause {
    Columns,
    Distinct,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
}

const CANONICAL: [Clause; 9] = [
    Clause::Columns,
    Clause::Distinct,
    Clause::From,
    Clause::Where,
    Clause::GroupBy,
    Clause::Having,
    Clause::OrderBy,
    Clause::Limit,
    Clause::Offset,
];

#[derive(Debug, Clone)]
struct Shape {
    columns: Vec<String>,
    distinct: bool,
    table: String,
    wheres: Vec<Pred>,
    group_by: Vec<String>,
    havings: Vec<Pred>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Shape {
    fn apply(&self, select: &mut Select, clause: Clause) {
        match clause {
            Clause::Columns => {
                for c in &self.columns {
                    select.column(c);
                }
            }
            Clause::Distinct => {
                select.distinct(self.distinct);
            }
            Clause::From => {
                select.from(&self.table);
            }
            Clause::Where => {
                for p in &self.wheres {
                    select.where_clause(p.to_cond()).unwrap();
                }
            }
            Clause::GroupBy => {
                for g in &self.group_by {
                    select.group_by(&[g.as_str()]);
                }
            }
            Clause::Having => {
                for p in &self.havings {
                    select.having(p.to_cond()).unwrap();
                }
            }
            Clause::OrderBy => {
                for o in &self.order_by {
                    select.order_by_asc(o);
                }
            }
            Clause::Limit => {
                if let Some(n) = self.limit {
                    select.limit(n);
                }
            }
            Clause::Offset => {
                if let Some(n) = self.offset {
                    select.offset(n);
                }
            }
        }
    }

    fn build(&self, order: &[Clause]) -> Select {
        let mut select = Select::new();
        for clause in order {
            self.apply(&mut select, *clause);
        }
        select
    }
}

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn arb_pred() -> impl Strategy<Value = Pred> {
    prop_oneof![
        vec(any::<i64>(), 0..4).prop_map(Pred::Raw),
        (arb_ident(), any::<i64>()).prop_map(|(c, v)| Pred::Eq(c, v)),
        (arb_ident(), vec(any::<i64>(), 0..4)).prop_map(|(c, v)| Pred::In(c, v)),
        (arb_ident(), any::<i64>(), any::<i64>()).prop_map(|(c, a, b)| Pred::Or(c, a, b)),
    ]
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (
        vec(arb_ident(), 1..4),
        any::<bool>(),
        arb_ident(),
        vec(arb_pred(), 0..4),
        vec(arb_ident(), 0..3),
        vec(arb_pred(), 0..3),
        vec(arb_ident(), 0..3),
        proptest::option::of(0_u64..10_000),
        proptest::option::of(0_u64..10_000),
    )
        .prop_map(
            |(columns, distinct, table, wheres, group_by, havings, order_by, limit, offset)| Shape {
                columns,
                distinct,
                table,
                wheres,
                group_by,
                havings,
                order_by,
                limit,
                offset,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn placeholder_argument_parity(shape in arb_shape()) {
        let select = shape.build(&CANONICAL);
        for dialect in all_dialects() {
            let rendered = render_with(&select, dialect.as_ref());
            prop_assert_eq!(
                count_placeholders(&rendered.sql, dialect.as_ref()),
                rendered.args.len()
            );
            assert_parity(&rendered, dialect.as_ref());
        }
    }

    #[test]
    fn rendering_is_deterministic(shape in arb_shape()) {
        let select = shape.build(&CANONICAL);
        for dialect in all_dialects() {
            let first = render_with(&select, dialect.as_ref());
            let second = render_with(&select, dialect.as_ref());
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn clause_order_does_not_matter(
        shape in arb_shape(),
        order in Just(CANONICAL.to_vec()).prop_shuffle(),
    ) {
        let canonical = shape.build(&CANONICAL);
        let shuffled = shape.build(&order);
        for dialect in all_dialects() {
            prop_assert_eq!(
                render_with(&canonical, dialect.as_ref()),
                render_with(&shuffled, dialect.as_ref())
            );
        }
    }

    #[test]
    fn single_member_groups_render_as_their_member(preds in vec(arb_pred(), 1..4)) {
        let plain = Cond::all(preds.iter().map(Pred::to_cond));
        let wrapped = Cond::all(
            preds
                .iter()
                .map(|p| Cond::any([Cond::all([p.to_cond()])])),
        );
        for dialect in all_dialects() {
            prop_assert_eq!(
                render_with(&plain, dialect.as_ref()),
                render_with(&wrapped, dialect.as_ref())
            );
        }
    }

    #[test]
    fn update_assignments_keep_parity(
        pairs in vec((arb_ident(), any::<i64>()), 1..6),
        id in any::<i64>(),
    ) {
        let mut update = Update::new("t");
        update.set_map(pairs.clone()).unwrap();
        update.where_clause(col("id").eq(id)).unwrap();
        let distinct: std::collections::HashSet<&String> = pairs.iter().map(|(c, _)| c).collect();
        for dialect in all_dialects() {
            let rendered = render_with(&update, dialect.as_ref());
            prop_assert_eq!(rendered.args.len(), distinct.len() + 1);
            assert_parity(&rendered, dialect.as_ref());
        }
    }
}
