//! Direct evaluation of public expressions.

use std::collections::HashMap;

use crate::error::EvalError;
use crate::expr::Expression;

/// Variable assignment used for evaluation.
pub type Bindings = HashMap<String, bool>;

pub trait Eval {
    /// Evaluates `self` under `bindings`, failing on the first variable that
    /// has no binding. And/Or short-circuit, so an unbound variable on the
    /// skipped side goes unnoticed.
    fn evaluate(&self, bindings: &Bindings) -> Result<bool, EvalError>;
}

impl Eval for Expression {
    fn evaluate(&self, bindings: &Bindings) -> Result<bool, EvalError> {
        match self {
            Expression::And(lhs, rhs) => Ok(lhs.evaluate(bindings)? && rhs.evaluate(bindings)?),
            Expression::Or(lhs, rhs) => Ok(lhs.evaluate(bindings)? || rhs.evaluate(bindings)?),
            Expression::Xor(lhs, rhs) => {
                let lhs = lhs.evaluate(bindings)?;
                let rhs = rhs.evaluate(bindings)?;
                Ok((lhs || rhs) && !(lhs && rhs))
            }
            Expression::Not(inner) => Ok(!inner.evaluate(bindings)?),
            Expression::Parenthesized(inner) => inner.evaluate(bindings),
            Expression::Variable(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expression::True => Ok(true),
            Expression::False => Ok(false),
        }
    }
}

/// Builds [`Bindings`] from `(name, value)` pairs.
pub fn bindings<I, S>(pairs: I) -> Bindings
where
    I: IntoIterator<Item = (S, bool)>,
    S: Into<String>,
{
    pairs.into_iter().map(|(name, value)| (name.into(), value)).collect()
}
