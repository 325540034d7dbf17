//! Bounded queries and in-place edits over one IR node.
//!
//! A [`Querier`] pairs a node with the [`ExpressionPath`] at which that node
//! sits inside some larger tree. Every location it reports is expressed in
//! the coordinates of that larger tree, so a location found while querying a
//! deep sub-node can be handed straight to a querier over the root.
//!
//! Read-only queries are available whenever the querier holds anything that
//! dereferences to an [`Ir`] (`&Ir`, `&mut Ir`, `Box<Ir>`). Edits require
//! mutable access.
//!
//! # Example
//!
//! ```
//! use boolalg::ir::Ir;
//! use boolalg::querier::{EquivalenceMode, Querier};
//!
//! let mut root = Ir::and(vec![Ir::variable("a"), Ir::or(vec![Ir::variable("b"), Ir::variable("a")])]);
//! let a = Ir::variable("a");
//!
//! // Find `a` anywhere below the inner `or`, reported relative to the root.
//! let or_location = Querier::new(&root).location_of(&Ir::or(vec![Ir::variable("b"), Ir::variable("a")]), EquivalenceMode::Layout).unwrap();
//! let inner = Querier::at(root.get(&or_location).unwrap(), or_location.clone());
//! let found = inner.location_of(&a, EquivalenceMode::Layout).unwrap();
//! assert_eq!(found.to_string(), "root.and[1].or[1]");
//!
//! // Remove it through a querier over the whole tree.
//! let mut querier = Querier::new(&mut root);
//! assert!(querier.remove_recursive(&found));
//! assert_eq!(root, Ir::and(vec![Ir::variable("a"), Ir::variable("b")]));
//! ```

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use crate::canonical::canonicalize_ir;
use crate::eval::Bindings;
use crate::ir::{Ir, VisitResult};
use crate::paths::ExpressionPath;

/// How strictly two nodes must agree to count as "the same".
///
/// Modes are listed from strictest to most permissive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EquivalenceMode {
    /// The very same node instance.
    Identity,
    /// Exact structural equality.
    Layout,
    /// Structural equality after canonicalizing both sides, so operand
    /// order and grouping of associative chains are ignored.
    Transitive,
    /// Same value under every assignment of the union of both sides'
    /// variables.
    TruthTable,
}

impl EquivalenceMode {
    pub fn are_equivalent(self, lhs: &Ir, rhs: &Ir) -> bool {
        match self {
            EquivalenceMode::Identity => std::ptr::eq(lhs, rhs),
            EquivalenceMode::Layout => lhs == rhs,
            // Canonicalizing never changes the discriminant of the root.
            EquivalenceMode::Transitive => {
                lhs == rhs
                    || (lhs.discriminant() == rhs.discriminant()
                        && canonicalize_ir(lhs.clone()) == canonicalize_ir(rhs.clone()))
            }
            EquivalenceMode::TruthTable => lhs == rhs || same_truth_table(lhs, rhs),
        }
    }
}

fn same_truth_table(lhs: &Ir, rhs: &Ir) -> bool {
    let mut variables = lhs.variables();
    variables.extend(rhs.variables());
    let variables: Vec<String> = variables.into_iter().collect();
    assert!(
        variables.len() < usize::BITS as usize,
        "Too many variables to compare truth tables: {}",
        variables.len()
    );

    let mut bindings = Bindings::with_capacity(variables.len());
    for index in 0..(1usize << variables.len()) {
        for (i, name) in variables.iter().enumerate() {
            bindings.insert(name.clone(), (index >> i) & 1 == 1);
        }
        match (lhs.evaluate(&bindings), rhs.evaluate(&bindings)) {
            (Ok(l), Ok(r)) if l == r => {}
            _ => return false,
        }
    }
    true
}

#[derive(Debug)]
pub struct Querier<T> {
    expression: T,
    location: ExpressionPath,
}

impl<T> Querier<T> {
    /// Queries `expression` as the root of its own tree.
    pub fn new(expression: T) -> Self {
        Self::at(expression, ExpressionPath::root())
    }

    /// Queries `expression`, which sits at `location` within a larger tree.
    pub fn at(expression: T, location: ExpressionPath) -> Self {
        Self { expression, location }
    }

    /// Location of the queried node within the larger tree.
    pub fn path(&self) -> &ExpressionPath {
        &self.location
    }
}

impl<T: Deref<Target = Ir>> Querier<T> {
    pub fn expression(&self) -> &Ir {
        &self.expression
    }

    /// Returns `true` if a direct operand is equivalent to `node`.
    pub fn contains(&self, node: &Ir, mode: EquivalenceMode) -> bool {
        self.location_of(node, mode).is_some()
    }

    /// Returns `true` if any node strictly below the queried node is
    /// equivalent to `node`.
    pub fn deep_contains(&self, node: &Ir, mode: EquivalenceMode) -> bool {
        self.deep_location_of(node, mode).is_some()
    }

    /// Location of the first direct operand equivalent to `node`.
    pub fn location_of(&self, node: &Ir, mode: EquivalenceMode) -> Option<ExpressionPath> {
        self.expression
            .sub_expressions_with_location(&self.location)
            .into_iter()
            .find(|(sub, _)| mode.are_equivalent(sub, node))
            .map(|(_, location)| location)
    }

    /// Locations of all direct operands equivalent to `node`, in order.
    pub fn locations_of(&self, node: &Ir, mode: EquivalenceMode) -> Vec<ExpressionPath> {
        self.expression
            .sub_expressions_with_location(&self.location)
            .into_iter()
            .filter(|(sub, _)| mode.are_equivalent(sub, node))
            .map(|(_, location)| location)
            .collect()
    }

    /// Location of the first node, in pre-order, strictly below the queried
    /// node that is equivalent to `node`.
    pub fn deep_location_of(&self, node: &Ir, mode: EquivalenceMode) -> Option<ExpressionPath> {
        let mut result = None;
        self.expression.walk_locating(|sub, local| {
            if !local.is_root() && mode.are_equivalent(sub, node) {
                result = Some(local.appending(&self.location));
                return VisitResult::Stop;
            }
            VisitResult::VisitSubExpressions
        });
        result
    }

    /// Locations of all outermost matches strictly below the queried node.
    /// The search does not descend into a match, so the returned locations
    /// never overlap.
    pub fn deep_locations_of(&self, node: &Ir, mode: EquivalenceMode) -> Vec<ExpressionPath> {
        let mut result = Vec::new();
        self.expression.walk_locating(|sub, local| {
            if !local.is_root() && mode.are_equivalent(sub, node) {
                result.push(local.appending(&self.location));
                return VisitResult::IgnoreSubExpressions;
            }
            VisitResult::VisitSubExpressions
        });
        result
    }

    /// Checks whether the queried node covers `node`.
    ///
    /// When both are n-ary nodes of the same kind, every operand of `node`
    /// must be matched by a distinct direct operand of the queried node.
    /// Otherwise this is plain [`contains`][Self::contains].
    pub fn has_superset_of(&self, node: &Ir, mode: EquivalenceMode) -> bool {
        let own = self.expression.discriminant();
        match node.operands() {
            Some(needles) if own == node.discriminant() => {
                let mut taken = HashSet::new();
                needles.iter().all(|needle| {
                    match self
                        .locations_of(needle, mode)
                        .into_iter()
                        .find(|location| !taken.contains(location))
                    {
                        Some(location) => {
                            taken.insert(location);
                            true
                        }
                        None => false,
                    }
                })
            }
            _ => self.contains(node, mode),
        }
    }
}

impl<T: DerefMut<Target = Ir>> Querier<T> {
    /// Translates a location in outer-tree coordinates into one relative to
    /// the queried node.
    fn local(&self, at: &ExpressionPath) -> ExpressionPath {
        match at.relative_to(&self.location) {
            Some(local) => local,
            None => panic!("path {} lies outside the queried node at {}", at, self.location),
        }
    }

    /// Substitutes the node at `at` with `node` and returns the node that
    /// was there. `at` equal to the querier's own location replaces the
    /// whole queried node.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not exist.
    pub fn replace(&mut self, at: &ExpressionPath, node: Ir) -> Ir {
        let local = self.local(at);
        self.expression.replace_at(&local, node)
    }

    /// Replaces every direct operand equivalent to `node` with a copy of
    /// `with`, returning how many were replaced.
    pub fn replace_matching(&mut self, node: &Ir, with: &Ir, mode: EquivalenceMode) -> usize {
        let locations = self.locations_of(node, mode);
        for location in &locations {
            self.replace(location, with.clone());
        }
        locations.len()
    }

    /// Replaces every outermost node strictly below the queried node that is
    /// equivalent to `node` with a copy of `with`.
    pub fn deep_replace_matching(&mut self, node: &Ir, with: &Ir, mode: EquivalenceMode) -> usize {
        let locations = self.deep_locations_of(node, mode);
        for location in &locations {
            self.replace(location, with.clone());
        }
        locations.len()
    }

    /// Removes the node at `at`, collapsing ancestors as described in
    /// [`Ir::remove_at`]. Returns `false` and leaves the tree untouched when
    /// nothing is left to collapse into, which includes removing the
    /// queried node itself.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not exist.
    pub fn remove_recursive(&mut self, at: &ExpressionPath) -> bool {
        let local = self.local(at);
        self.expression.remove_at(&local)
    }

    /// Removes the node at `at` if its parent is an n-ary node, dropping it
    /// or collapsing the parent into the surviving sibling. Anywhere else
    /// (under a negation, or at the queried node itself) the node is
    /// replaced by `placeholder` instead.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not exist.
    pub fn remove(&mut self, at: &ExpressionPath, placeholder: Ir) {
        let local = self.local(at);
        let collapsible = local
            .parent()
            .and_then(|parent| self.expression.get(&parent))
            .and_then(Ir::operands)
            .map_or(false, |operands| operands.len() >= 2);
        if collapsible && self.expression.remove_at(&local) {
            return;
        }
        self.expression.replace_at(&local, placeholder);
    }
}
