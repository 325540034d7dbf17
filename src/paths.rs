//! Structural addresses of nodes inside an IR tree.
//!
//! An [`ExpressionPath`] is the ordered list of edges taken from a root down
//! to a target node. Paths are plain values: they do not refer to any
//! particular tree, so the same path locates the same position in any
//! structurally identical copy.
//!
//! # Example
//!
//! ```
//! use boolalg::paths::{ExpressionPath, Step};
//!
//! let local = ExpressionPath::root().child(Step::NotOperand);
//! let parent = ExpressionPath::root().child(Step::AndOperand(1));
//!
//! // Re-express a path found below `parent` relative to the overall root.
//! let full = local.appending(&parent);
//! assert_eq!(full.inverse(), &[Step::AndOperand(1), Step::NotOperand]);
//! ```

use std::fmt;

/// One edge of a path.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Step {
    AndOperand(usize),
    OrOperand(usize),
    XorOperand(usize),
    NotOperand,
}


impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AndOperand(i) => write!(f, "and[{}]", i),
            Step::OrOperand(i) => write!(f, "or[{}]", i),
            Step::XorOperand(i) => write!(f, "xor[{}]", i),
            Step::NotOperand => write!(f, "not"),
        }
    }
}

/// Address of a node relative to some root. The empty path is the root.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExpressionPath {
    steps: Vec<Step>,
}

impl ExpressionPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps from root to target, in order.
    pub fn inverse(&self) -> &[Step] {
        &self.steps
    }

    /// Rebuilds a path from the steps returned by [`inverse`][Self::inverse].
    pub fn from_inverse<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Returns this path extended by one step.
    pub fn child(&self, step: Step) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }

    /// The path one level up, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.steps.split_last()?;
        Some(Self {
            steps: init.to_vec(),
        })
    }

    /// The final step, or `None` for the root.
    pub fn last(&self) -> Option<Step> {
        self.steps.last().copied()
    }

    /// Splices `parent` in as a prefix of `self`.
    ///
    /// Used when a path was computed relative to a sub-root located at
    /// `parent`, and must be re-expressed relative to the overall root.
    pub fn appending(&self, parent: &ExpressionPath) -> Self {
        let mut steps = Vec::with_capacity(parent.steps.len() + self.steps.len());
        steps.extend_from_slice(&parent.steps);
        steps.extend_from_slice(&self.steps);
        Self { steps }
    }

    /// Strips `prefix` from the front of `self`, returning the remainder,
    /// or `None` if `self` does not lie under `prefix`.
    pub fn relative_to(&self, prefix: &ExpressionPath) -> Option<Self> {
        let rest = self.steps.strip_prefix(prefix.steps.as_slice())?;
        Some(Self {
            steps: rest.to_vec(),
        })
    }
}

impl fmt::Display for ExpressionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for step in &self.steps {
            write!(f, ".{}", step)?;
        }
        Ok(())
    }
}

impl FromIterator<Step> for ExpressionPath {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Self::from_inverse(iter)
    }
}
