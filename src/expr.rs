//! The public expression tree.
//!
//! [`Expression`] is the input and output format of the whole library: the
//! parser produces it, the reducer consumes and returns it, and evaluation
//! and truth tables operate on it. It is a plain immutable value; all
//! rewriting happens on the internal representation in [`crate::ir`].
//!
//! Operators are strictly binary. Chains built by the parser are
//! right-associative, so `a * b * c` is `And(a, And(b, c))`.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Variable(String),
    True,
    False,
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Xor(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Parenthesized(Box<Expression>),
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    pub fn constant(value: bool) -> Self {
        if value {
            Expression::True
        } else {
            Expression::False
        }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expression::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expression::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expression::Xor(Box::new(lhs), Box::new(rhs))
    }

    // No double negation elimination: the tree keeps exactly what was written.
    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expression::Not(Box::new(value))
    }

    pub fn parenthesized(value: Self) -> Self {
        Expression::Parenthesized(Box::new(value))
    }

    /// Direct sub-expressions, left to right.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::And(l, r) | Expression::Or(l, r) | Expression::Xor(l, r) => {
                vec![l.as_ref(), r.as_ref()]
            }
            Expression::Not(e) | Expression::Parenthesized(e) => vec![e.as_ref()],
            Expression::Variable(_) | Expression::True | Expression::False => vec![],
        }
    }

    /// Returns the set of unique variable names, sorted lexicographically.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let Expression::Variable(name) = expr {
                result.insert(name.clone());
            }
            stack.extend(expr.children());
        }
        result
    }

    /// Number of nodes in the tree, parentheses included.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Expression::size).sum::<usize>()
    }

    /// Renders an operand of a conjunction: only a disjunction needs
    /// parentheses there.
    fn fmt_and_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Or(..) => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }

    /// Renders the operand of a negation: any operator gets parentheses.
    fn fmt_not_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::And(..) | Expression::Or(..) | Expression::Xor(..) | Expression::Not(..) => {
                write!(f, "({})", self)
            }
            _ => write!(f, "{}", self),
        }
    }
}

/// Pretty-printer. Uses `*`, `+`, `^` and `¬`, with precedence
/// `¬ > * > ^ > +`.
///
/// Note that an `Xor` operand of an `And` is printed bare, so
/// `And(Xor(a, b), c)` renders as `a ^ b * c`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::And(lhs, rhs) => {
                lhs.fmt_and_operand(f)?;
                write!(f, " * ")?;
                rhs.fmt_and_operand(f)
            }
            Expression::Or(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            Expression::Xor(lhs, rhs) => write!(f, "{} ^ {}", lhs, rhs),
            Expression::Not(inner) => match inner.as_ref() {
                Expression::Not(_) => write!(f, "¬({})", inner),
                _ => {
                    write!(f, "¬")?;
                    inner.fmt_not_operand(f)
                }
            },
            Expression::Parenthesized(inner) => write!(f, "({})", inner),
            Expression::True => write!(f, "1"),
            Expression::False => write!(f, "0"),
            Expression::Variable(name) => write!(f, "{}", name),
        }
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::constant(value)
    }
}

impl From<&str> for Expression {
    fn from(name: &str) -> Self {
        Expression::var(name)
    }
}

impl From<String> for Expression {
    fn from(name: String) -> Self {
        Expression::Variable(name)
    }
}

impl BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expression::and(self, rhs)
    }
}

impl BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expression::or(self, rhs)
    }
}

impl BitXor for Expression {
    type Output = Expression;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Expression::xor(self, rhs)
    }
}

impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        Expression::not(self)
    }
}
