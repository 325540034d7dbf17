//! Error types surfaced by the public API.
//!
//! Only parsing, evaluation, and resource-bounded reduction can fail.
//! Everything else in the rewriting engine is total over well-formed IR,
//! and misuse of it (a path that does not exist, an empty operand list)
//! is a contract violation that panics instead.

use thiserror::Error;

/// Failure while evaluating an expression against a set of bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
}

/// Syntax error produced by the parser.
///
/// `position` is a byte offset into the input; it equals the input length
/// when the input ended too early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Which bound of [`ReducerConfig`][crate::config::ReducerConfig] was hit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    Passes,
    Nodes,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Passes => write!(f, "rewrite passes"),
            Resource::Nodes => write!(f, "expression nodes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error("reduction exhausted its budget of {limit} {resource} (reached {value})")]
    ResourceExhausted {
        resource: Resource,
        limit: usize,
        value: usize,
    },
}

/// Union of all library errors, convenient for callers chaining
/// parse, evaluate, and reduce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_messages() {
        let err = EvalError::UndefinedVariable("x".to_string());
        assert_eq!(err.to_string(), "undefined variable 'x'");

        let err = ParseError::new("unexpected ')'", 3);
        assert_eq!(err.to_string(), "syntax error at position 3: unexpected ')'");

        let err = ReduceError::ResourceExhausted {
            resource: Resource::Passes,
            limit: 10,
            value: 11,
        };
        assert_eq!(
            err.to_string(),
            "reduction exhausted its budget of 10 rewrite passes (reached 11)"
        );
    }

    #[test]
    fn test_from() {
        let err: Error = ParseError::new("oops", 0).into();
        assert!(matches!(err, Error::Parse(_)));
        let err: Error = EvalError::UndefinedVariable("a".to_string()).into();
        assert!(matches!(err, Error::Eval(_)));
    }
}
