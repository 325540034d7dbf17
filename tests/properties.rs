//! Property-based tests over randomly generated expressions.
//!
//! Checked properties:
//! 1. Evaluation agrees with every row of the truth table.
//! 2. Canonicalization is idempotent and ignores operand order.
//! 3. Reduction preserves the truth table and is convergent.

use boolalg::canonical::canonicalize;
use boolalg::config::ReducerConfig;
use boolalg::eval::{Bindings, Eval};
use boolalg::expr::Expression;
use boolalg::reducer::Reducer;
use proptest::prelude::*;

// -- Strategies --

fn leaf() -> impl Strategy<Value = Expression> {
    prop_oneof![
        4 => prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(Expression::var),
        1 => any::<bool>().prop_map(Expression::constant),
    ]
}

/// Expressions of depth at most 4 over the variables `a` to `d`.
fn expression() -> impl Strategy<Value = Expression> {
    leaf().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::xor(l, r)),
            inner.clone().prop_map(Expression::not),
            inner.prop_map(Expression::parenthesized),
        ]
    })
}

fn reducer_config() -> ReducerConfig {
    ReducerConfig::default().with_max_passes(2_000).with_max_nodes(5_000)
}

fn reduce(expression: &Expression) -> Option<Expression> {
    Reducer::with_config(expression, reducer_config()).reduce().ok()
}

// -- Properties --

proptest! {
    #[test]
    fn evaluation_agrees_with_truth_table(e in expression()) {
        let table = e.generate_truth_table();
        for row in &table.rows {
            let bindings: Bindings = table
                .variables
                .iter()
                .cloned()
                .zip(row.values.iter().copied())
                .collect();
            prop_assert_eq!(e.evaluate(&bindings), Ok(row.result));
        }
    }

    #[test]
    fn canonicalize_is_idempotent(e in expression()) {
        let once = canonicalize(&e);
        prop_assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn canonicalize_ignores_operand_order(l in expression(), r in expression()) {
        prop_assert_eq!(
            canonicalize(&Expression::and(l.clone(), r.clone())),
            canonicalize(&Expression::and(r.clone(), l.clone()))
        );
        prop_assert_eq!(
            canonicalize(&Expression::or(l.clone(), r.clone())),
            canonicalize(&Expression::or(r, l))
        );
    }

    #[test]
    fn canonicalize_preserves_truth_table(e in expression()) {
        let canonical = canonicalize(&e);
        prop_assert!(e.generate_truth_table().equivalent(&canonical.generate_truth_table()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reduce_preserves_truth_table(e in expression()) {
        let reduced = reduce(&e);
        prop_assume!(reduced.is_some());
        let reduced = reduced.unwrap();
        prop_assert!(
            e.generate_truth_table().equivalent(&reduced.generate_truth_table()),
            "{} reduced to {}",
            e,
            reduced
        );
    }

    #[test]
    fn reduce_is_convergent(e in expression()) {
        let once = reduce(&e);
        prop_assume!(once.is_some());
        let once = once.unwrap();
        let twice = reduce(&once);
        prop_assume!(twice.is_some());
        prop_assert_eq!(canonicalize(&twice.unwrap()), canonicalize(&once));
    }
}
