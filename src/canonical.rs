//! Canonical form of expressions.
//!
//! Two expressions that differ only in grouping, parentheses, or the order
//! of commutative operands have the same canonical form. The form is
//! obtained by lowering to [`Ir`], flattening, and deep-sorting.

use crate::expr::Expression;
use crate::ir::Ir;

/// Canonicalizes a public expression.
///
/// The result is right-associative with operands in canonical order
/// (`Constant < Variable < Not < And < Xor < Or`). Canonicalization is
/// idempotent.
pub fn canonicalize(expression: &Expression) -> Expression {
    canonicalize_ir(Ir::from(expression)).to_expression()
}

/// Flattens and deep-sorts an IR tree.
pub fn canonicalize_ir(ir: Ir) -> Ir {
    let mut ir = ir.into_flattened();
    ir.deep_sort();
    ir
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::parser::parse;

    fn canonical(text: &str) -> Expression {
        canonicalize(&parse(text).unwrap())
    }

    #[test]
    fn test_order_and_grouping_invariance() {
        assert_eq!(canonical("b * a"), canonical("a * b"));
        assert_eq!(canonical("(c + a) + b"), canonical("a + (b + c)"));
        assert_eq!(canonical("(x ^ y) * !z"), canonical("!z * (y ^ x)"));
    }

    #[test]
    fn test_shape() {
        let a = Expression::var("a");
        let b = Expression::var("b");
        let c = Expression::var("c");
        assert_eq!(canonical("c * (b * a)"), a.clone() & (b.clone() & c.clone()));
        assert_eq!(canonical("(b + c) * a * 1"), Expression::True & (a & (b | c)));
    }

    #[test]
    fn test_idempotent() {
        for text in ["a * (c + b) ^ !d", "((a))", "1 + x * 0", "!(b + a) * !!c"] {
            let once = canonical(text);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_does_not_simplify() {
        assert_eq!(canonical("a * a").to_string(), "a * a");
        assert_eq!(canonical("!!a").to_string(), "¬(¬a)");
    }
}
