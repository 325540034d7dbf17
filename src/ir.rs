//! Internal representation used by the rewriting engine.
//!
//! [`Ir`] is a closed tagged tree. Unlike [`Expression`], its operators are
//! n-ary: converting an expression flattens nested chains of the same
//! operator into one operand list, so `(a * b) * c` and `a * (b * c)` both
//! become `And([a, b, c])`. Parentheses are dropped on the way in.
//!
//! # Ownership
//!
//! Every node is owned by exactly one position of exactly one tree: a
//! [`Vec`] of operands or a [`Box`]. Attaching a node somewhere else means
//! moving it (or cloning it first), so no parent links are needed to keep
//! trees from sharing nodes, and identity comparison ([`std::ptr::eq`]) of
//! two references into the same tree is meaningful.
//!
//! # Invariants
//!
//! - `And`, `Or` and `Xor` have at least two operands in every observable
//!   state. The [`Ir::and`] family of constructors collapses a single
//!   operand into itself and rejects an empty list.
//! - `Not` has exactly one operand.
//!
//! # Ordering
//!
//! The derived [`Ord`] is the canonical order used to sort operands:
//! `Constant < Variable < Not < And < Xor < Or` by variant, then
//! `false < true` for constants, names for variables, the operand for
//! negations, and the operand lists lexicographically for n-ary nodes.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::EvalError;
use crate::eval::Bindings;
use crate::expr::Expression;
use crate::paths::{ExpressionPath, Step};

/// The variant tag of an [`Ir`] node.
///
/// Declaration order is the canonical sort priority.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Discriminant {
    Constant,
    Variable,
    Not,
    And,
    Xor,
    Or,
}

impl Discriminant {
    pub fn is_nary(self) -> bool {
        matches!(self, Discriminant::And | Discriminant::Xor | Discriminant::Or)
    }

    /// The "other" binary operator for distribution purposes: And and Or
    /// are each other's opposite.
    pub fn opposite(self) -> Option<Discriminant> {
        match self {
            Discriminant::And => Some(Discriminant::Or),
            Discriminant::Or => Some(Discriminant::And),
            _ => None,
        }
    }

    /// Path step for operand `index` of a node with this discriminant.
    pub fn step(self, index: usize) -> Option<Step> {
        match self {
            Discriminant::And => Some(Step::AndOperand(index)),
            Discriminant::Or => Some(Step::OrOperand(index)),
            Discriminant::Xor => Some(Step::XorOperand(index)),
            Discriminant::Not => Some(Step::NotOperand),
            Discriminant::Constant | Discriminant::Variable => None,
        }
    }
}

// Variant order matters: it is the derived `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ir {
    Constant(bool),
    Variable(String),
    Not(Box<Ir>),
    And(Vec<Ir>),
    Xor(Vec<Ir>),
    Or(Vec<Ir>),
}

/// What a walk should do after visiting a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VisitResult {
    VisitSubExpressions,
    IgnoreSubExpressions,
    Stop,
}

impl Ir {
    pub fn variable(name: impl Into<String>) -> Self {
        Ir::Variable(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Ir) -> Self {
        Ir::Not(Box::new(operand))
    }

    /// Conjunction of `operands`; a single operand is returned as is.
    ///
    /// # Panics
    ///
    /// Panics if `operands` is empty.
    pub fn and(operands: Vec<Ir>) -> Self {
        Ir::nary(Discriminant::And, operands)
    }

    /// Disjunction of `operands`; a single operand is returned as is.
    ///
    /// # Panics
    ///
    /// Panics if `operands` is empty.
    pub fn or(operands: Vec<Ir>) -> Self {
        Ir::nary(Discriminant::Or, operands)
    }

    /// Exclusive disjunction of `operands`; a single operand is returned as
    /// is.
    ///
    /// # Panics
    ///
    /// Panics if `operands` is empty.
    pub fn xor(operands: Vec<Ir>) -> Self {
        Ir::nary(Discriminant::Xor, operands)
    }

    /// Builds an n-ary node of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if `operands` is empty or `discriminant` is not n-ary.
    pub fn nary(discriminant: Discriminant, mut operands: Vec<Ir>) -> Self {
        assert!(!operands.is_empty(), "{:?} requires at least one operand", discriminant);
        if operands.len() == 1 {
            return operands.pop().unwrap_or(Ir::Constant(false));
        }
        match discriminant {
            Discriminant::And => Ir::And(operands),
            Discriminant::Or => Ir::Or(operands),
            Discriminant::Xor => Ir::Xor(operands),
            other => panic!("{:?} is not an n-ary discriminant", other),
        }
    }

    pub fn discriminant(&self) -> Discriminant {
        match self {
            Ir::Constant(_) => Discriminant::Constant,
            Ir::Variable(_) => Discriminant::Variable,
            Ir::Not(_) => Discriminant::Not,
            Ir::And(_) => Discriminant::And,
            Ir::Xor(_) => Discriminant::Xor,
            Ir::Or(_) => Discriminant::Or,
        }
    }

    pub fn is_nary(&self) -> bool {
        self.discriminant().is_nary()
    }

    pub fn is_constant(&self, value: bool) -> bool {
        matches!(self, Ir::Constant(v) if *v == value)
    }

    /// Operand list of an n-ary node.
    pub fn operands(&self) -> Option<&[Ir]> {
        match self {
            Ir::And(ops) | Ir::Or(ops) | Ir::Xor(ops) => Some(ops),
            _ => None,
        }
    }

    /// Direct sub-expressions, in order.
    pub fn sub_expressions(&self) -> Vec<&Ir> {
        match self {
            Ir::And(ops) | Ir::Or(ops) | Ir::Xor(ops) => ops.iter().collect(),
            Ir::Not(operand) => vec![operand.as_ref()],
            Ir::Constant(_) | Ir::Variable(_) => vec![],
        }
    }

    /// Direct sub-expressions paired with their location, where `parent` is
    /// the location of `self`.
    pub fn sub_expressions_with_location(&self, parent: &ExpressionPath) -> Vec<(&Ir, ExpressionPath)> {
        let discriminant = self.discriminant();
        self.sub_expressions()
            .into_iter()
            .enumerate()
            .filter_map(|(i, sub)| discriminant.step(i).map(|step| (sub, parent.child(step))))
            .collect()
    }

    /// The node reached by following a single `step` from `self`.
    pub fn child(&self, step: Step) -> Option<&Ir> {
        match (self, step) {
            (Ir::And(ops), Step::AndOperand(i)) | (Ir::Or(ops), Step::OrOperand(i)) | (Ir::Xor(ops), Step::XorOperand(i)) => {
                ops.get(i)
            }
            (Ir::Not(operand), Step::NotOperand) => Some(operand),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, step: Step) -> Option<&mut Ir> {
        match (self, step) {
            (Ir::And(ops), Step::AndOperand(i)) | (Ir::Or(ops), Step::OrOperand(i)) | (Ir::Xor(ops), Step::XorOperand(i)) => {
                ops.get_mut(i)
            }
            (Ir::Not(operand), Step::NotOperand) => Some(operand),
            _ => None,
        }
    }

    /// Locates the node at `path` relative to `self`.
    ///
    /// Returns `None` if the path does not exist within `self`.
    pub fn get(&self, path: &ExpressionPath) -> Option<&Ir> {
        path.inverse().iter().try_fold(self, |node, &step| node.child(step))
    }

    pub fn get_mut(&mut self, path: &ExpressionPath) -> Option<&mut Ir> {
        path.inverse().iter().try_fold(self, |node, &step| node.child_mut(step))
    }

    /// Total number of nodes in this tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(|_| {
            count += 1;
            VisitResult::VisitSubExpressions
        });
        count
    }

    /// Depth-first pre-order walk. Operands are visited left to right.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&Ir) -> VisitResult,
    {
        let mut stack = vec![self];
        while let Some(next) = stack.pop() {
            match visitor(next) {
                VisitResult::VisitSubExpressions => stack.extend(next.sub_expressions().into_iter().rev()),
                VisitResult::IgnoreSubExpressions => {}
                VisitResult::Stop => return,
            }
        }
    }

    /// Like [`walk`][Self::walk], also handing the visitor each node's
    /// location relative to `self`.
    pub fn walk_locating<F>(&self, mut visitor: F)
    where
        F: FnMut(&Ir, &ExpressionPath) -> VisitResult,
    {
        let mut stack = vec![(self, ExpressionPath::root())];
        while let Some((next, location)) = stack.pop() {
            match visitor(next, &location) {
                VisitResult::VisitSubExpressions => {
                    stack.extend(next.sub_expressions_with_location(&location).into_iter().rev())
                }
                VisitResult::IgnoreSubExpressions => {}
                VisitResult::Stop => return,
            }
        }
    }

    /// Returns a copy with directly nested chains of the same n-ary operator
    /// merged into one operand list, at every depth.
    pub fn flattened(&self) -> Ir {
        self.clone().into_flattened()
    }

    /// Consuming version of [`flattened`][Self::flattened].
    pub fn into_flattened(self) -> Ir {
        match self {
            Ir::And(ops) => Ir::And(flatten_operands(Discriminant::And, ops)),
            Ir::Or(ops) => Ir::Or(flatten_operands(Discriminant::Or, ops)),
            Ir::Xor(ops) => Ir::Xor(flatten_operands(Discriminant::Xor, ops)),
            Ir::Not(operand) => Ir::Not(Box::new(operand.into_flattened())),
            leaf => leaf,
        }
    }

    /// Sorts every operand list in the tree by the canonical order,
    /// innermost lists first.
    pub fn deep_sort(&mut self) {
        match self {
            Ir::And(ops) | Ir::Or(ops) | Ir::Xor(ops) => {
                for op in ops.iter_mut() {
                    op.deep_sort();
                }
                ops.sort();
            }
            Ir::Not(operand) => operand.deep_sort(),
            Ir::Constant(_) | Ir::Variable(_) => {}
        }
    }

    pub fn deep_sorted(&self) -> Ir {
        let mut copy = self.clone();
        copy.deep_sort();
        copy
    }

    /// Converts back into a public expression, chaining n-ary operand lists
    /// right-associatively: `And([a, b, c])` becomes `a * (b * c)`.
    pub fn to_expression(&self) -> Expression {
        match self {
            Ir::And(ops) => right_associate(ops, Expression::True, Expression::and),
            Ir::Or(ops) => right_associate(ops, Expression::False, Expression::or),
            Ir::Xor(ops) => right_associate(ops, Expression::False, Expression::xor),
            Ir::Not(operand) => Expression::not(operand.to_expression()),
            Ir::Variable(name) => Expression::Variable(name.clone()),
            Ir::Constant(value) => Expression::constant(*value),
        }
    }

    /// Evaluates this tree directly, failing on an unbound variable.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<bool, EvalError> {
        match self {
            Ir::And(ops) => {
                for op in ops {
                    if !op.evaluate(bindings)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Ir::Or(ops) => {
                for op in ops {
                    if op.evaluate(bindings)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Ir::Xor(ops) => ops
                .iter()
                .try_fold(false, |acc, op| Ok(acc != op.evaluate(bindings)?)),
            Ir::Not(operand) => Ok(!operand.evaluate(bindings)?),
            Ir::Variable(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Ir::Constant(value) => Ok(*value),
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        self.walk(|node| {
            if let Ir::Variable(name) = node {
                result.insert(name.clone());
            }
            VisitResult::VisitSubExpressions
        });
        result
    }

    /// Substitutes the node at `path` with `node`, returning the node that
    /// was there.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not exist within `self`.
    pub fn replace_at(&mut self, path: &ExpressionPath, node: Ir) -> Ir {
        match self.get_mut(path) {
            Some(slot) => std::mem::replace(slot, node),
            None => panic!("path {} does not exist in the expression", path),
        }
    }

    /// Removes the node at `path`, collapsing its ancestors as needed.
    ///
    /// - An operand of an n-ary node with more than two operands is dropped.
    /// - An operand of a two-operand node leaves the node collapsed into its
    ///   surviving sibling.
    /// - The operand of a negation takes the negation with it, and the
    ///   removal continues one level up.
    ///
    /// Returns `false`, leaving `self` untouched, when the removal would
    /// propagate past the root (including when `path` is the root itself).
    ///
    /// # Panics
    ///
    /// Panics if `path` does not exist within `self`.
    pub fn remove_at(&mut self, path: &ExpressionPath) -> bool {
        self.remove_steps(path.inverse(), path)
    }

    fn remove_steps(&mut self, steps: &[Step], path: &ExpressionPath) -> bool {
        let Some((&step, rest)) = steps.split_first() else {
            return false;
        };

        let survivor = match (&mut *self, step) {
            (Ir::Not(operand), Step::NotOperand) => return operand.remove_steps(rest, path),
            (Ir::And(ops), Step::AndOperand(i)) | (Ir::Or(ops), Step::OrOperand(i)) | (Ir::Xor(ops), Step::XorOperand(i))
                if i < ops.len() =>
            {
                if ops[i].remove_steps(rest, path) {
                    return true;
                }
                if ops.len() > 2 {
                    ops.remove(i);
                    return true;
                }
                ops.swap_remove(i);
                ops.pop()
            }
            _ => panic!("path {} does not exist in the expression", path),
        };

        match survivor {
            Some(node) => {
                *self = node;
                true
            }
            None => false,
        }
    }
}

/// Flattens each operand, then splices in the operands of any operand that
/// has the same discriminant as the parent.
fn flatten_operands(discriminant: Discriminant, operands: Vec<Ir>) -> Vec<Ir> {
    let mut result = Vec::with_capacity(operands.len());
    for op in operands {
        let op = op.into_flattened();
        match op {
            Ir::And(inner) if discriminant == Discriminant::And => result.extend(inner),
            Ir::Or(inner) if discriminant == Discriminant::Or => result.extend(inner),
            Ir::Xor(inner) if discriminant == Discriminant::Xor => result.extend(inner),
            other => result.push(other),
        }
    }
    result
}

fn right_associate(operands: &[Ir], unit: Expression, binary: fn(Expression, Expression) -> Expression) -> Expression {
    let mut iter = operands.iter().rev();
    let Some(last) = iter.next() else {
        return unit;
    };
    iter.fold(last.to_expression(), |acc, op| binary(op.to_expression(), acc))
}

impl From<&Expression> for Ir {
    /// Lowers a public expression, dropping parentheses, and flattens the
    /// result once.
    fn from(expression: &Expression) -> Self {
        fn lower(expression: &Expression) -> Ir {
            match expression {
                Expression::And(lhs, rhs) => Ir::And(vec![lower(lhs), lower(rhs)]),
                Expression::Or(lhs, rhs) => Ir::Or(vec![lower(lhs), lower(rhs)]),
                Expression::Xor(lhs, rhs) => Ir::Xor(vec![lower(lhs), lower(rhs)]),
                Expression::Not(inner) => Ir::not(lower(inner)),
                Expression::Parenthesized(inner) => lower(inner),
                Expression::Variable(name) => Ir::Variable(name.clone()),
                Expression::True => Ir::Constant(true),
                Expression::False => Ir::Constant(false),
            }
        }

        lower(expression).into_flattened()
    }
}

impl From<Expression> for Ir {
    fn from(expression: Expression) -> Self {
        Ir::from(&expression)
    }
}

impl fmt::Display for Ir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(f: &mut fmt::Formatter<'_>, ir: &Ir) -> fmt::Result {
            if ir.is_nary() {
                write!(f, "({})", ir)
            } else {
                write!(f, "{}", ir)
            }
        }

        let separator = match self {
            Ir::And(_) => " * ",
            Ir::Or(_) => " + ",
            Ir::Xor(_) => " ^ ",
            Ir::Not(inner) => {
                write!(f, "¬")?;
                return operand(f, inner);
            }
            Ir::Variable(name) => return write!(f, "{}", name),
            Ir::Constant(value) => return write!(f, "{}", if *value { "1" } else { "0" }),
        };
        for (i, op) in self.sub_expressions().into_iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            operand(f, op)?;
        }
        Ok(())
    }
}
