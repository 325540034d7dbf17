//! Shared sub-term discovery for distribution and factoring.
//!
//! A [`CommonTermCollector`] looks at one n-ary node and reports which of
//! its operands (or its operands' operands) repeat. Terms are grouped by
//! [transitive] equivalence, so `b * a` and `a * b` fall in the same group.
//!
//! [transitive]: EquivalenceMode::Transitive

use std::collections::HashSet;

use crate::ir::Ir;
use crate::paths::ExpressionPath;
use crate::querier::EquivalenceMode;

/// A term together with every location where it (or an equivalent term)
/// occurs. The term is the first occurrence found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTerm<'a> {
    pub term: &'a Ir,
    pub locations: Vec<ExpressionPath>,
}

impl<'a> CollectedTerm<'a> {
    pub fn new(term: &'a Ir, location: ExpressionPath) -> Self {
        Self {
            term,
            locations: vec![location],
        }
    }
}

/// One product term of a fully distributed expansion: a single pick from
/// each operand's term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributedTerm<'a> {
    pub terms: Vec<CollectedTerm<'a>>,
}

pub struct CommonTermCollector<'a> {
    expression: &'a Ir,
    path: ExpressionPath,
}

impl<'a> CommonTermCollector<'a> {
    /// Collects over `expression`, which sits at `path` within a larger tree.
    ///
    /// # Panics
    ///
    /// Panics if `expression` is not an n-ary node.
    pub fn new(expression: &'a Ir, path: ExpressionPath) -> Self {
        assert!(
            expression.is_nary(),
            "CommonTermCollector requires an n-ary node, found {:?}",
            expression.discriminant()
        );
        Self { expression, path }
    }

    /// Every direct operand, each with its own location, repeated or not.
    pub fn terms(&self) -> Vec<CollectedTerm<'a>> {
        self.expression
            .sub_expressions_with_location(&self.path)
            .into_iter()
            .map(|(term, location)| CollectedTerm::new(term, location))
            .collect()
    }

    /// Direct operands that occur at least twice.
    pub fn minimal_terms(&self) -> Vec<CollectedTerm<'a>> {
        let mut result: Vec<CollectedTerm<'a>> = Vec::new();
        for (term, location) in self.expression.sub_expressions_with_location(&self.path) {
            match result
                .iter_mut()
                .find(|group| EquivalenceMode::Transitive.are_equivalent(group.term, term))
            {
                Some(group) => group.locations.push(location),
                None => result.push(CollectedTerm::new(term, location)),
            }
        }
        result.retain(|group| group.locations.len() > 1);
        result
    }

    /// Operands of compound operands (operands of the opposite kind: the
    /// `And`s of an `Or`, the `Or`s of an `And`) that are shared by at least
    /// two compound operands.
    pub fn compound_terms(&self) -> Vec<CollectedTerm<'a>> {
        let (groups, _) = self.compound_groups();
        groups
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(group, _)| group)
            .collect()
    }

    /// Like [`compound_terms`][Self::compound_terms], restricted to terms
    /// shared by every compound operand.
    pub fn maximal_compound_terms(&self) -> Vec<CollectedTerm<'a>> {
        let (groups, compound_count) = self.compound_groups();
        if compound_count < 2 {
            return vec![];
        }
        groups
            .into_iter()
            .filter(|(_, owners)| owners.len() == compound_count)
            .map(|(group, _)| group)
            .collect()
    }

    /// Groups the operands of every compound operand, recording which
    /// compound operands (by ordinal) each group was seen in. Also returns
    /// the number of compound operands.
    fn compound_groups(&self) -> (Vec<(CollectedTerm<'a>, HashSet<usize>)>, usize) {
        let Some(compound) = self.expression.discriminant().opposite() else {
            return (vec![], 0);
        };

        let mut groups: Vec<(CollectedTerm<'a>, HashSet<usize>)> = Vec::new();
        let mut count = 0;
        for (operand, location) in self.expression.sub_expressions_with_location(&self.path) {
            if operand.discriminant() != compound {
                continue;
            }
            for (term, term_location) in operand.sub_expressions_with_location(&location) {
                match groups
                    .iter_mut()
                    .find(|(group, _)| EquivalenceMode::Transitive.are_equivalent(group.term, term))
                {
                    Some((group, owners)) => {
                        group.locations.push(term_location);
                        owners.insert(count);
                    }
                    None => groups.push((CollectedTerm::new(term, term_location), HashSet::from([count]))),
                }
            }
            count += 1;
        }
        (groups, count)
    }

    /// Expands the node by the distributive law, returning one entry per
    /// product term: operands of the opposite kind contribute their own
    /// operands, every other operand contributes itself.
    ///
    /// For `a * (b + c)` this yields `[a, b]` and `[a, c]`.
    pub fn distributed_terms(&self) -> Vec<DistributedTerm<'a>> {
        let compound = self.expression.discriminant().opposite();
        let per_operand: Vec<Vec<CollectedTerm<'a>>> = self
            .terms()
            .into_iter()
            .map(|term| {
                if Some(term.term.discriminant()) == compound {
                    let location = term.locations[0].clone();
                    CommonTermCollector::new(term.term, location).terms()
                } else {
                    vec![term]
                }
            })
            .collect();

        cartesian_product(&per_operand)
            .into_iter()
            .map(|terms| DistributedTerm { terms })
            .collect()
    }
}

/// Every combination of one item from each list, leftmost list varying
/// slowest. Empty input yields no combinations.
fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.is_empty() {
        return vec![];
    }
    lists.iter().fold(vec![vec![]], |acc, list| {
        acc.iter()
            .flat_map(|prefix| {
                list.iter().map(move |item| {
                    let mut next = prefix.clone();
                    next.push(item.clone());
                    next
                })
            })
            .collect()
    })
}
