//! Law-driven simplification of boolean expressions.
//!
//! The [`Reducer`] rewrites an expression with a fixed set of boolean
//! identities until it stops changing. Each identity is a [`Law`]. A law
//! looks at a single node and either proposes a [`Rewrite`] of the tree or
//! declines.
//!
//! # Algorithm
//!
//! The input is canonicalized once. Then:
//!
//! 1. Every `Xor` is expanded into `And`/`Or`/`Not`, innermost first, using
//!    `a ^ b = (a + b) * ¬(a * b)`.
//! 2. Expansion: conjunctions are distributed over disjunctions until none
//!    is left (`a(b + c) => ab + ac`).
//! 3. Reduction: the laws of [`Law::REDUCTION`] are applied, in that
//!    priority order, until none fires.
//! 4. Steps 2 and 3 repeat until a full cycle reaches a state that has
//!    been seen at the start of an earlier cycle.
//!
//! Each pass of steps 1 to 3 visits the tree bottom-up (operands before the
//! node holding them) and stops at the first law that fires. The tree is
//! re-canonicalized after every successful pass.
//!
//! The result is a fixpoint of this rule set, not a minimal form.
//!
//! # Example
//!
//! ```
//! use boolalg::parser::parse;
//! use boolalg::reducer::reduce;
//!
//! let input = parse("(a + b) * (a + c)").unwrap();
//! let output = reduce(&input).unwrap();
//! assert_eq!(output.to_string(), "a + b * c");
//! ```

use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use crate::canonical::canonicalize_ir;
use crate::collector::CommonTermCollector;
use crate::config::ReducerConfig;
use crate::error::{ReduceError, Resource};
use crate::expr::Expression;
use crate::ir::{Discriminant, Ir};
use crate::paths::ExpressionPath;
use crate::querier::{EquivalenceMode, Querier};

/// A single boolean identity, usable as a rewrite step.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Law {
    /// `a ^ b = (a + b)¬(ab)`
    ExpandXor,
    /// `a(b + c) = ab + ac`
    Distributive,
    /// `¬(ab) = ¬a + ¬b` | `¬(a + b) = ¬a¬b`
    DeMorgan,
    /// `¬a + ¬b = ¬(ab)` | `¬a¬b = ¬(a + b)`
    InverseDeMorgan,
    /// `¬0 = 1` | `¬1 = 0`
    NegationOfConstant,
    /// `¬(¬a) = a`
    DoubleNegation,
    /// `aa = a` | `a + a = a`
    Idempotent,
    /// `0a = 0` | `1 + a = 1`
    Null,
    /// `1a = a` | `0 + a = a`
    Identity,
    /// `a¬a = 0` | `a + ¬a = 1`
    Inverse,
    /// `a(a + b) = a` | `a + ab = a`
    Absorption,
    /// `ab + ac = a(b + c)` | `(a + b)(a + c) = a + bc`
    InverseDistributive,
}

impl Law {
    /// Laws of the reduction phase, highest priority first.
    pub const REDUCTION: [Law; 9] = [
        Law::DeMorgan,
        Law::NegationOfConstant,
        Law::DoubleNegation,
        Law::Idempotent,
        Law::Null,
        Law::Identity,
        Law::Inverse,
        Law::Absorption,
        Law::InverseDistributive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Law::ExpandXor => "xor expansion",
            Law::Distributive => "distributive law",
            Law::DeMorgan => "de morgan",
            Law::InverseDeMorgan => "inverse de morgan",
            Law::NegationOfConstant => "negation of constant",
            Law::DoubleNegation => "double negation",
            Law::Idempotent => "idempotent law",
            Law::Null => "null law",
            Law::Identity => "identity law",
            Law::Inverse => "inverse law",
            Law::Absorption => "absorption law",
            Law::InverseDistributive => "inverse distributive law",
        }
    }

    /// Proposes a rewrite of the tree for the node `node` found at `at`, or
    /// `None` if the law does not apply there.
    pub fn rewrite(self, node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
        match self {
            Law::ExpandXor => expand_xor(node, at),
            Law::Distributive => distributive(node, at),
            Law::DeMorgan => de_morgan(node, at),
            Law::InverseDeMorgan => inverse_de_morgan(node, at),
            Law::NegationOfConstant => negation_of_constant(node, at),
            Law::DoubleNegation => double_negation(node, at),
            Law::Idempotent => idempotent(node, at),
            Law::Null => null(node, at),
            Law::Identity => identity(node, at),
            Law::Inverse => inverse(node, at),
            Law::Absorption => absorption(node, at),
            Law::InverseDistributive => inverse_distributive(node, at),
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An edit of the whole tree, addressed from its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Replace { at: ExpressionPath, node: Ir },
    RemoveRecursive { at: ExpressionPath },
}

impl Rewrite {
    fn replace(at: &ExpressionPath, node: Ir) -> Self {
        Rewrite::Replace { at: at.clone(), node }
    }
}

pub struct Reducer {
    expression: Ir,
    config: ReducerConfig,
    passes: usize,
}

impl Reducer {
    pub fn new(expression: &Expression) -> Self {
        Self::with_config(expression, ReducerConfig::default())
    }

    pub fn with_config(expression: &Expression, config: ReducerConfig) -> Self {
        Self {
            expression: canonicalize_ir(Ir::from(expression)),
            config,
            passes: 0,
        }
    }

    /// The current, canonical, state of the tree.
    pub fn expression(&self) -> &Ir {
        &self.expression
    }

    /// Number of rewrite passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn to_expression(&self) -> Expression {
        self.expression.to_expression()
    }

    /// Applies `law` to the root node only. Returns whether it fired.
    pub fn apply_law(&mut self, law: Law) -> bool {
        match law.rewrite(&self.expression, &ExpressionPath::root()) {
            Some(rewrite) => {
                self.apply(rewrite);
                true
            }
            None => false,
        }
    }

    /// Runs the full reduction and returns the simplified expression.
    pub fn reduce(&mut self) -> Result<Expression, ReduceError> {
        debug!("reduce({})", self.expression);

        self.run_to_fixpoint(&[Law::ExpandXor])?;

        // Expansion and reduction can undo each other; stop at the first
        // state that comes around twice.
        let mut seen = HashSet::new();
        while seen.insert(self.expression.clone()) {
            self.run_to_fixpoint(&[Law::Distributive])?;
            self.run_to_fixpoint(&Law::REDUCTION)?;
        }

        debug!("reduce: done after {} passes => {}", self.passes, self.expression);
        Ok(self.to_expression())
    }

    fn run_to_fixpoint(&mut self, laws: &[Law]) -> Result<(), ReduceError> {
        while self.pass(laws)? {}
        Ok(())
    }

    /// Visits the tree bottom-up and applies the first rewrite any of `laws`
    /// proposes. Returns whether a rewrite was applied.
    fn pass(&mut self, laws: &[Law]) -> Result<bool, ReduceError> {
        self.passes += 1;
        if self.passes > self.config.max_passes {
            return Err(ReduceError::ResourceExhausted {
                resource: Resource::Passes,
                limit: self.config.max_passes,
                value: self.passes,
            });
        }

        let Some(rewrite) = find_rewrite(&self.expression, &ExpressionPath::root(), laws) else {
            return Ok(false);
        };
        self.apply(rewrite);
        trace!("pass {}: {}", self.passes, self.expression);

        let size = self.expression.size();
        if size > self.config.max_nodes {
            return Err(ReduceError::ResourceExhausted {
                resource: Resource::Nodes,
                limit: self.config.max_nodes,
                value: size,
            });
        }
        Ok(true)
    }

    fn apply(&mut self, rewrite: Rewrite) {
        let mut querier = Querier::new(&mut self.expression);
        match rewrite {
            Rewrite::Replace { at, node } => {
                querier.replace(&at, node);
            }
            Rewrite::RemoveRecursive { at } => {
                let removed = querier.remove_recursive(&at);
                assert!(removed, "removal at {} left nothing to collapse into", at);
            }
        }
        let expression = std::mem::replace(&mut self.expression, Ir::Constant(false));
        self.expression = canonicalize_ir(expression);
    }
}

/// Reduces `expression` with the default configuration.
pub fn reduce(expression: &Expression) -> Result<Expression, ReduceError> {
    Reducer::new(expression).reduce()
}

/// Post-order search for the first node at which one of `laws` fires.
fn find_rewrite(node: &Ir, at: &ExpressionPath, laws: &[Law]) -> Option<Rewrite> {
    for (sub, location) in node.sub_expressions_with_location(at) {
        if let Some(rewrite) = find_rewrite(sub, &location, laws) {
            return Some(rewrite);
        }
    }
    laws.iter().find_map(|law| law.rewrite(node, at))
}

fn expand_xor(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let Ir::Xor(operands) = node else {
        return None;
    };
    let (first, rest) = operands.split_first()?;
    let expanded = rest.iter().fold(first.clone(), |cumulative, operand| {
        Ir::and(vec![
            Ir::or(vec![operand.clone(), cumulative.clone()]),
            Ir::not(Ir::and(vec![operand.clone(), cumulative])),
        ])
    });
    debug!("xor expansion: {} => {}", node, expanded);
    Some(Rewrite::replace(at, expanded))
}

fn distributive(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let Ir::And(operands) = node else {
        return None;
    };
    if !operands.iter().any(|op| matches!(op, Ir::Or(_))) {
        return None;
    }

    let products = CommonTermCollector::new(node, at.clone())
        .distributed_terms()
        .into_iter()
        .map(|product| Ir::and(product.terms.into_iter().map(|t| t.term.clone()).collect()))
        .collect();
    let expanded = Ir::or(products).into_flattened();
    debug!("distributive law: {} => {}", node, expanded);
    Some(Rewrite::replace(at, expanded))
}

fn de_morgan(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let Ir::Not(inner) = node else {
        return None;
    };
    let (kind, operands) = match inner.as_ref() {
        Ir::And(ops) => (Discriminant::Or, ops),
        Ir::Or(ops) => (Discriminant::And, ops),
        _ => return None,
    };
    let result = Ir::nary(kind, operands.iter().cloned().map(Ir::not).collect());
    debug!("de morgan: {} => {}", node, result);
    Some(Rewrite::replace(at, result))
}

fn inverse_de_morgan(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let kind = node.discriminant();
    let inner_kind = kind.opposite()?;
    let operands = node.operands()?;

    let (negated, remaining): (Vec<&Ir>, Vec<&Ir>) = operands.iter().partition(|op| matches!(op, Ir::Not(_)));
    if negated.len() < 2 {
        return None;
    }

    let inner: Vec<Ir> = negated
        .into_iter()
        .filter_map(|op| match op {
            Ir::Not(inner) => Some(inner.as_ref().clone()),
            _ => None,
        })
        .collect();
    let mut result: Vec<Ir> = remaining.into_iter().cloned().collect();
    result.push(Ir::not(Ir::nary(inner_kind, inner)));
    let result = Ir::nary(kind, result);
    debug!("inverse de morgan: {} => {}", node, result);
    Some(Rewrite::replace(at, result))
}

fn negation_of_constant(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let Ir::Not(inner) = node else {
        return None;
    };
    let Ir::Constant(value) = inner.as_ref() else {
        return None;
    };
    debug!("negation of constant: {} => {}", node, Ir::Constant(!value));
    Some(Rewrite::replace(at, Ir::Constant(!value)))
}

fn double_negation(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let Ir::Not(inner) = node else {
        return None;
    };
    let Ir::Not(operand) = inner.as_ref() else {
        return None;
    };
    debug!("double negation: {} => {}", node, operand);
    Some(Rewrite::replace(at, operand.as_ref().clone()))
}

fn idempotent(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    if !matches!(node, Ir::And(_) | Ir::Or(_)) {
        return None;
    }
    let group = CommonTermCollector::new(node, at.clone())
        .minimal_terms()
        .into_iter()
        .next()?;
    let duplicate = group.locations.get(1)?.clone();
    debug!("idempotent law: {} => drop {} at {}", node, group.term, duplicate);
    Some(Rewrite::RemoveRecursive { at: duplicate })
}

fn null(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let (absorbing, operands) = match node {
        Ir::And(ops) => (false, ops),
        Ir::Or(ops) => (true, ops),
        _ => return None,
    };
    if !operands.iter().any(|op| op.is_constant(absorbing)) {
        return None;
    }
    debug!("null law: {} => {}", node, Ir::Constant(absorbing));
    Some(Rewrite::replace(at, Ir::Constant(absorbing)))
}

fn identity(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let (unit, operands) = match node {
        Ir::And(ops) => (true, ops),
        Ir::Or(ops) => (false, ops),
        _ => return None,
    };
    if !operands.iter().any(|op| op.is_constant(unit)) {
        return None;
    }

    let kept: Vec<Ir> = operands.iter().filter(|op| !op.is_constant(unit)).cloned().collect();
    let result = if kept.is_empty() {
        Ir::Constant(unit)
    } else {
        Ir::nary(node.discriminant(), kept)
    };
    debug!("identity law: {} => {}", node, result);
    Some(Rewrite::replace(at, result))
}

fn inverse(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let (absorbing, operands) = match node {
        Ir::And(ops) => (false, ops),
        Ir::Or(ops) => (true, ops),
        _ => return None,
    };
    let querier = Querier::at(node, at.clone());
    let witness = operands
        .iter()
        .find(|op| querier.contains(&Ir::not((*op).clone()), EquivalenceMode::Transitive))?;
    debug!("inverse law: {} => {} (on {})", node, Ir::Constant(absorbing), witness);
    Some(Rewrite::replace(at, Ir::Constant(absorbing)))
}

fn absorption(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let kind = node.discriminant();
    let compound = kind.opposite()?;
    let operands = node.operands()?;

    for (i, absorber) in operands.iter().enumerate() {
        for (j, other) in operands.iter().enumerate() {
            if i == j || other.discriminant() != compound {
                continue;
            }
            let location = at.child(kind.step(j)?);
            if Querier::at(other, location.clone()).has_superset_of(absorber, EquivalenceMode::Transitive) {
                debug!("absorption law: {} => drop {} at {}", node, other, location);
                return Some(Rewrite::RemoveRecursive { at: location });
            }
        }
    }
    None
}

fn inverse_distributive(node: &Ir, at: &ExpressionPath) -> Option<Rewrite> {
    let kind = node.discriminant();
    let compound = kind.opposite()?;

    // One factor at a time, preferring one shared by every compound operand.
    let collector = CommonTermCollector::new(node, at.clone());
    let leading = collector
        .maximal_compound_terms()
        .into_iter()
        .next()
        .or_else(|| collector.compound_terms().into_iter().next())?;

    let mut rests = Vec::new();
    let mut remaining = Vec::new();
    for (operand, location) in node.sub_expressions_with_location(at) {
        let holds_leading = operand.discriminant() == compound
            && leading
                .locations
                .iter()
                .any(|l| l.parent().as_ref() == Some(&location));
        if !holds_leading {
            remaining.push(operand.clone());
            continue;
        }

        let rest: Vec<Ir> = operand
            .sub_expressions_with_location(&location)
            .into_iter()
            .filter(|(_, l)| !leading.locations.contains(l))
            .map(|(sub, _)| sub.clone())
            .collect();
        // An exhausted operand is the unit of its own operator.
        rests.push(if rest.is_empty() {
            Ir::Constant(compound == Discriminant::And)
        } else {
            Ir::nary(compound, rest)
        });
    }

    let factored = Ir::nary(compound, vec![leading.term.clone(), Ir::nary(kind, rests)]);
    let result = if remaining.is_empty() {
        factored
    } else {
        remaining.insert(0, factored);
        Ir::nary(kind, remaining)
    }
    .into_flattened();
    debug!("inverse distributive law: {} => {}", node, result);
    Some(Rewrite::replace(at, result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::canonical::canonicalize;
    use crate::eval::{bindings, Eval};
    use crate::parser::parse;

    fn canonical(text: &str) -> Expression {
        canonicalize(&parse(text).unwrap())
    }

    fn reduced(text: &str) -> Expression {
        reduce(&parse(text).unwrap()).unwrap()
    }

    fn step(text: &str, law: Law) -> Expression {
        let mut reducer = Reducer::new(&parse(text).unwrap());
        assert!(reducer.apply_law(law), "{} did not fire on {}", law, text);
        reducer.to_expression()
    }

    fn assert_reduces_equivalently(text: &str) {
        let input = parse(text).unwrap();
        let output = reduce(&input).unwrap();
        assert!(
            input.generate_truth_table().equivalent(&output.generate_truth_table()),
            "{} reduced to {}, which is not equivalent",
            input,
            output
        );
    }

    #[test]
    fn test_reduce_atomic_variable() {
        assert_eq!(reduced("a"), canonical("a"));
    }

    #[test]
    fn test_reduce_double_negation() {
        assert_eq!(reduced("!a"), canonical("!a"));
        assert_eq!(reduced("!!a"), canonical("a"));
        assert_eq!(reduced("!!!a"), canonical("!a"));
    }

    #[test]
    fn test_reduce_negation_of_constant() {
        assert_eq!(step("!0", Law::NegationOfConstant), Expression::True);
        assert_eq!(step("!1", Law::NegationOfConstant), Expression::False);
        assert_eq!(reduced("!!!0"), Expression::True);
        assert_eq!(reduced("!!!1"), Expression::False);
    }

    #[test]
    fn test_de_morgan() {
        assert_eq!(step("!(a * b)", Law::DeMorgan), canonical("!a + !b"));
        assert_eq!(step("!(a * !b)", Law::DeMorgan), canonical("!a + !!b"));
        assert_eq!(step("!(a + b)", Law::DeMorgan), canonical("!a * !b"));
        assert_eq!(step("!(a + !b)", Law::DeMorgan), canonical("!a * !!b"));
    }

    #[test]
    fn test_inverse_de_morgan() {
        assert_eq!(step("!a + !b", Law::InverseDeMorgan), canonical("!(a * b)"));
        assert_eq!(step("!a * !b * c", Law::InverseDeMorgan), canonical("c * !(a + b)"));
        let mut reducer = Reducer::new(&parse("!a * b").unwrap());
        assert!(!reducer.apply_law(Law::InverseDeMorgan));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(step("a * a", Law::Idempotent), canonical("a"));
        assert_eq!(step("a + a", Law::Idempotent), canonical("a"));
        assert_eq!(step("(a + b) * (a + b)", Law::Idempotent), canonical("a + b"));
        assert_eq!(step("(a + a) * (a + a)", Law::Idempotent), canonical("a + a"));
        assert_eq!(step("(a * a) + (a * a)", Law::Idempotent), canonical("a * a"));
        assert_eq!(step("(a + b) * (b + a)", Law::Idempotent), canonical("a + b"));

        assert_eq!(reduced("a * a * a * a"), canonical("a"));
        assert_eq!(reduced("a + a + a + a"), canonical("a"));
    }

    #[test]
    fn test_idempotent_skips_sub_expressions() {
        let mut reducer = Reducer::new(&parse("a + (b * a)").unwrap());
        assert!(!reducer.apply_law(Law::Idempotent));
    }

    #[test]
    fn test_identity() {
        assert_eq!(step("1 * a", Law::Identity), canonical("a"));
        assert_eq!(step("a * 1", Law::Identity), canonical("a"));
        assert_eq!(step("a * (1 * b)", Law::Identity), canonical("a * b"));
        assert_eq!(step("0 + a", Law::Identity), canonical("a"));
        assert_eq!(step("a + 0", Law::Identity), canonical("a"));
        assert_eq!(step("a + (0 + b)", Law::Identity), canonical("a + b"));
        assert_eq!(step("1 * 1", Law::Identity), Expression::True);
    }

    #[test]
    fn test_null() {
        assert_eq!(step("0 * a", Law::Null), Expression::False);
        assert_eq!(step("a * 0", Law::Null), Expression::False);
        assert_eq!(step("a * 0 * b", Law::Null), Expression::False);
        assert_eq!(step("1 + a", Law::Null), Expression::True);
        assert_eq!(step("a + 1", Law::Null), Expression::True);
        assert_eq!(step("a + 1 + b", Law::Null), Expression::True);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(step("a * !a", Law::Inverse), Expression::False);
        assert_eq!(step("a * b * !a", Law::Inverse), Expression::False);
        assert_eq!(step("a + !a", Law::Inverse), Expression::True);
        assert_eq!(step("a + b + !a", Law::Inverse), Expression::True);
        assert_eq!(step("(a * b) + !(b * a)", Law::Inverse), Expression::True);
    }

    #[test]
    fn test_absorption() {
        assert_eq!(step("a * (a + b)", Law::Absorption), canonical("a"));
        assert_eq!(step("a * (b + a)", Law::Absorption), canonical("a"));
        assert_eq!(step("(b + a) * a", Law::Absorption), canonical("a"));
        assert_eq!(step("(a + b) * a", Law::Absorption), canonical("a"));
        assert_eq!(step("(a + b) * (a + b + c)", Law::Absorption), canonical("a + b"));

        assert_eq!(step("(a * b) + (a * b) * c", Law::Absorption), canonical("a * b"));
        assert_eq!(step("a + a * b", Law::Absorption), canonical("a"));
        assert_eq!(step("a + b * a", Law::Absorption), canonical("a"));
        assert_eq!(step("b * a + a", Law::Absorption), canonical("a"));
        assert_eq!(step("a * b + a", Law::Absorption), canonical("a"));

        assert_eq!(reduced("a + b * a + b * c + a * c"), canonical("a + b * c"));
    }

    #[test]
    fn test_absorption_needs_superset() {
        let mut reducer = Reducer::new(&parse("(a + b) * (a + c)").unwrap());
        assert!(!reducer.apply_law(Law::Absorption));
    }

    #[test]
    fn test_distributive() {
        assert_eq!(step("a * (b + c)", Law::Distributive), canonical("a * b + a * c"));
        assert_eq!(step("(b + c) * a", Law::Distributive), canonical("a * b + a * c"));
        assert_eq!(
            step("(a + b) * (c + d)", Law::Distributive),
            canonical("a * c + a * d + b * c + b * d")
        );
        assert_eq!(step("(a + b) * (c * d)", Law::Distributive), canonical("a * c * d + b * c * d"));
    }

    #[test]
    fn test_distributive_leaves_disjunctions_alone() {
        let mut reducer = Reducer::new(&parse("d + (!a * b * !c) + (!a * !b * c)").unwrap());
        assert!(!reducer.apply_law(Law::Distributive));
    }

    #[test]
    fn test_inverse_distributive_conjunction() {
        assert_eq!(
            step("(a + b + c) * (a + d)", Law::InverseDistributive),
            canonical("a + (b + c) * d")
        );
        assert_eq!(step("(a + b) * (a + c)", Law::InverseDistributive), canonical("a + b * c"));
    }

    #[test]
    fn test_inverse_distributive_disjunction() {
        assert_eq!(
            step("(a * b * c) + (a * d)", Law::InverseDistributive),
            canonical("a * (b * c + d)")
        );
        assert_eq!(
            step("(a * b) + (a * c) + (d * e)", Law::InverseDistributive),
            canonical("a * (b + c) + d * e")
        );
    }

    #[test]
    fn test_inverse_distributive_exhausted_operand() {
        assert_eq!(step("(a * a) + (a * b)", Law::InverseDistributive), canonical("a * (1 + b)"));
        assert_eq!(step("(a * b) + (a * b * c)", Law::InverseDistributive), canonical("a * (b + b * c)"));
        assert_eq!(step("a * b + a * c * b", Law::InverseDistributive), canonical("a * (b + c * b)"));
    }

    #[test]
    fn test_expand_xor() {
        assert_eq!(step("a ^ b", Law::ExpandXor), canonical("(b + a) * !(b * a)"));
    }

    #[test]
    fn test_reduce_concrete() {
        assert_eq!(reduced("a * a"), canonical("a"));
        assert_eq!(reduced("!!a"), canonical("a"));
        assert_eq!(reduced("a * (a + b)"), canonical("a"));
        assert_eq!(reduced("(a + b) * (a + c)"), canonical("a + b * c"));
        assert_eq!(reduced("a * !a"), Expression::False);
        assert_eq!(reduced("(a * !b * !c) + (a * b * !c) + (a * !b * c) + (a * b * c)"), canonical("a"));
    }

    #[test]
    fn test_reduce_is_equivalent() {
        for text in [
            "!((b * 1 + c * d) * c) + d * 0",
            "!(b * b) + (!(c * 0) + 0 * C) * b",
            "!0 * a + (1 * c + c * 0) * !d",
            "(c * d + a * a + !((c * b + c * b) * a)) * !a + b * d",
            "d + (!a * b * !c) + (!a * !b * c)",
            "(a + b + c) * (a + d)",
            "(a * b * c) + (a * d)",
            "!(a ^ b) * (c + !a)",
        ] {
            assert_reduces_equivalently(text);
        }
    }

    #[test]
    fn test_reduce_tautology() {
        assert_eq!(reduced("!(b * b) + (!(c * 0) + 0 * C) * b"), Expression::True);
    }

    #[test]
    fn test_reduce_xor_parity() {
        let output = reduced("a ^ b ^ c");
        for bits in 0..8u32 {
            let (a, b, c) = (bits & 1 == 1, bits & 2 == 2, bits & 4 == 4);
            let env = bindings([("a", a), ("b", b), ("c", c)]);
            let odd = [a, b, c].iter().filter(|&&x| x).count() % 2 == 1;
            assert_eq!(output.evaluate(&env), Ok(odd), "{} at {:?}", output, (a, b, c));
        }
    }

    #[test]
    fn test_reduce_is_convergent() {
        for text in ["(a + b) * (a + c)", "a ^ b", "!(a * (b + !c)) + c", "(x + y) * (z + !x)"] {
            let once = reduced(text);
            let twice = reduce(&once).unwrap();
            assert_eq!(canonicalize(&twice), canonicalize(&once));
        }
    }

    #[test]
    fn test_pass_budget() {
        let config = ReducerConfig::default().with_max_passes(1);
        let mut reducer = Reducer::with_config(&parse("a * a * a").unwrap(), config);
        assert_eq!(
            reducer.reduce(),
            Err(ReduceError::ResourceExhausted {
                resource: Resource::Passes,
                limit: 1,
                value: 2,
            })
        );
    }

    #[test]
    fn test_node_budget() {
        let config = ReducerConfig::default().with_max_nodes(20);
        let mut reducer = Reducer::with_config(&parse("(a + b) * (c + d) * (e + f) * (g + h)").unwrap(), config);
        assert!(matches!(
            reducer.reduce(),
            Err(ReduceError::ResourceExhausted {
                resource: Resource::Nodes,
                limit: 20,
                ..
            })
        ));
    }

    #[test]
    #[should_panic(expected = "left nothing to collapse into")]
    fn test_remove_at_root_panics() {
        let mut reducer = Reducer::new(&parse("a * b").unwrap());
        reducer.apply(Rewrite::RemoveRecursive {
            at: ExpressionPath::root(),
        });
    }

    #[test]
    fn test_passes_counted() {
        let mut reducer = Reducer::new(&parse("a * a").unwrap());
        reducer.reduce().unwrap();
        assert!(reducer.passes() > 1);
        assert_eq!(reducer.expression(), &Ir::variable("a"));
    }
}
