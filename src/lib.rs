//! # boolalg: Boolean Algebra in Rust
//!
//! **`boolalg`** parses boolean expressions, evaluates them, tabulates them, and
//! simplifies them with the classic laws of boolean algebra.
//!
//! ## How simplification works
//!
//! An expression is lowered into a mutable [internal representation][crate::ir::Ir]
//! with n-ary operators, brought into a **canonical** form (nested chains of the
//! same operator merged, operands sorted), and then rewritten by the
//! [`Reducer`][crate::reducer::Reducer] until no law applies any more.
//! The result always has the same truth table as the input; it is not
//! guaranteed to be the shortest such expression.
//!
//! ## Key Features
//!
//! - **Text syntax**: `*`/`&`/`∧` for AND, `+`/`|`/`∨` for OR, `^`/`⊕` for XOR, `!`/`¬` for NOT, `0` and `1` for constants.
//! - **Structural addressing**: every node of an IR tree is reachable through an [`ExpressionPath`][crate::paths::ExpressionPath], so rewrites are local edits.
//! - **Four equivalence modes**: identity, layout, transitive (up to reordering), and truth table.
//! - **Bounded work**: reduction is capped by a [`ReducerConfig`][crate::config::ReducerConfig] and fails cleanly instead of looping.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolalg::parser::parse;
//! use boolalg::reducer::reduce;
//!
//! // 1. Parse
//! let input = parse("a * (a + b) + !!c").unwrap();
//!
//! // 2. Simplify
//! let output = reduce(&input).unwrap();
//! assert_eq!(output.to_string(), "a + c");
//!
//! // 3. Check that nothing changed semantically
//! let before = input.generate_truth_table();
//! let after = output.generate_truth_table();
//! assert!(before.equivalent(&after));
//! ```
//!
//! ## Core Components
//!
//! - **[`expr`]**, **[`parser`]**: the public expression tree and its text syntax.
//! - **[`eval`]**, **[`truth_table`]**: direct evaluation and brute-force tabulation.
//! - **[`ir`]**, **[`paths`]**, **[`querier`]**: the rewritable tree and the tools to inspect and edit it.
//! - **[`canonical`]**, **[`collector`]**: canonical form and shared sub-term discovery.
//! - **[`reducer`]**: the law-driven simplifier.

pub mod canonical;
pub mod collector;
pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod paths;
pub mod querier;
pub mod reducer;
pub mod truth_table;

pub use error::Error;
