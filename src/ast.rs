//! # Token Value Expressions
//!
//! This module defines the parsed form of a design token value.
//!
//! ## Architecture Overview
//!
//! - **[atoms]** - The typed pieces a value is split into (operators, literals, references)
//! - **[operators]** - The four arithmetic operators a formula may contain
//! - **[expression]** - One parsed value together with the path and type it came from
//!
//! ## Quick Start
//!
//! ```text
//! {spacing.sm} * 2
//! ```
//!
//! This value is parsed into three atoms: a reference to `spacing.sm`, the
//! operator `*` and the numeric literal `2`.
//!
//! ## Core Concepts
//!
//! ### Prefix Operators
//!
//! Operators are attached to the term that follows them. A formula is a
//! sequence of `(operator, term)` pairs where only the first pair may omit
//! the operator:
//!
//! ```text
//! -4px + {spacing.sm} * 2
//! ^      ^            ^
//! unary  binary       binary
//! ```
//!
//! ### Literals
//!
//! - **Numeric literals** carry a decimal value and an optional unit (`4px`, `1.5rem`, `50%`)
//! - **Opaque literals** are anything else (`bold`, `#ff0000`) and turn the whole
//!   value into a plain string when evaluated
//!
//! ### References
//!
//! ```text
//! {color.base}
//! {typography.heading.value.fontSize}
//! ```
//!
//! References point at other tokens in the tree and are resolved lazily by
//! the [`Evaluator`](crate::Evaluator).
pub mod atoms;
pub mod expression;
pub mod operators;

pub use atoms::Atom;
pub use expression::Expression;
pub use operators::Operator;
