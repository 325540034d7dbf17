//! Truth tables by brute-force enumeration.
//!
//! Tables are the black-box oracle for the rewriting engine: whatever the
//! reducer does, the table of its output must be [equivalent] to the table
//! of its input.
//!
//! Note: generation is O(2^n) in the number of variables.
//!
//! [equivalent]: TruthTable::equivalent

use std::fmt;

use crate::eval::{Bindings, Eval};
use crate::expr::Expression;

/// A single row: one value per table variable, plus the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    pub values: Vec<bool>,
    pub result: bool,
}

impl Row {
    pub fn new(values: Vec<bool>, result: bool) -> Self {
        Self { values, result }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    pub expression: Expression,
    /// Column names, in the same order as [`Row::values`].
    pub variables: Vec<String>,
    pub rows: Vec<Row>,
}

impl Expression {
    /// Generates the full truth table of this expression.
    ///
    /// Variables are sorted lexicographically. Row `i` assigns bit `k` of
    /// `i` to the `k`-th variable, so the first variable toggles fastest.
    ///
    /// # Panics
    ///
    /// Panics if the expression has more variables than fit in a row index.
    pub fn generate_truth_table(&self) -> TruthTable {
        let variables: Vec<String> = self.variables().into_iter().collect();
        assert!(
            variables.len() < usize::BITS as usize,
            "Too many variables for a truth table: {}",
            variables.len()
        );

        let total = 1usize << variables.len();
        let mut rows = Vec::with_capacity(total);
        let mut bindings = Bindings::with_capacity(variables.len());

        for index in 0..total {
            let values: Vec<bool> = (0..variables.len()).map(|i| (index >> i) & 1 == 1).collect();
            for (name, &value) in variables.iter().zip(values.iter()) {
                bindings.insert(name.clone(), value);
            }
            // Every variable is bound, so evaluation cannot fail.
            let result = self.evaluate(&bindings).unwrap_or(false);
            rows.push(Row::new(values, result));
        }

        TruthTable {
            expression: self.clone(),
            variables,
            rows,
        }
    }
}

impl TruthTable {
    pub fn new(expression: Expression, variables: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            expression,
            variables,
            rows,
        }
    }

    /// Checks whether two tables describe the same function over their
    /// shared variables.
    ///
    /// If one side has no variables it is a constant, and every row of the
    /// other side must produce that constant. Otherwise each row of the
    /// table with fewer variables is matched against every row of the other
    /// table that agrees with it on the shared variables, and all matched
    /// results must be equal.
    ///
    /// Rows with a `false` result count as much as rows with a `true`
    /// result, so `a` and `a + b` are not equivalent even though they agree
    /// on every row where `a` holds.
    pub fn equivalent(&self, other: &TruthTable) -> bool {
        if self.variables.is_empty() || other.variables.is_empty() {
            let (constant, table) = if self.variables.is_empty() {
                (self, other)
            } else {
                (other, self)
            };
            let Some(value) = constant.rows.first().map(|row| row.result) else {
                return table.rows.is_empty();
            };
            return table.rows.iter().all(|row| row.result == value);
        }

        let (small, large) = if self.variables.len() <= other.variables.len() {
            (self, other)
        } else {
            (other, self)
        };

        // Pairs of (column in small, column in large) for shared variables.
        let shared: Vec<(usize, usize)> = small
            .variables
            .iter()
            .enumerate()
            .filter_map(|(i, name)| large.variables.iter().position(|n| n == name).map(|j| (i, j)))
            .collect();

        small.rows.iter().all(|row| {
            large
                .rows
                .iter()
                .filter(|candidate| shared.iter().all(|&(i, j)| row.values[i] == candidate.values[j]))
                .all(|candidate| candidate.result == row.result)
        })
    }

    /// Renders the table with box-drawing separators, one row per line.
    pub fn to_ascii_table(&self, include_expression: bool) -> String {
        fn pad(input: &str, width: usize) -> String {
            let mut cells: Vec<char> = vec![' '; width / 2];
            cells.extend(input.chars());
            cells.extend(std::iter::repeat(' ').take(width / 2));
            let excess = cells.len().saturating_sub(width);
            cells.into_iter().skip(excess).collect()
        }

        fn bit(value: bool) -> &'static str {
            if value {
                "1"
            } else {
                "0"
            }
        }

        let mut lines = Vec::new();
        if include_expression {
            lines.push(self.expression.to_string());
        }

        let columns: Vec<String> = self
            .variables
            .iter()
            .map(|name| format!(" {} ", name))
            .chain(std::iter::once(" = ".to_string()))
            .collect();
        let widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();

        lines.push(columns.join("│"));
        lines.push(
            widths
                .iter()
                .map(|&w| "─".repeat(w))
                .collect::<Vec<_>>()
                .join("┼"),
        );

        for row in &self.rows {
            let cells: Vec<String> = row
                .values
                .iter()
                .chain(std::iter::once(&row.result))
                .zip(widths.iter())
                .map(|(&value, &width)| pad(bit(value), width))
                .collect();
            lines.push(cells.join("│"));
        }

        lines.join("\n")
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table(false))
    }
}
