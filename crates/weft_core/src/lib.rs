//! Parser-combinator engine.
//!
//! Grammars are built from small immutable [`Parser`] values and combined
//! with methods such as [`Parser::then`], [`Parser::or`] and
//! [`Parser::repeat`]. A parse returns an [`Outcome`] rather than an error:
//! grammatical mismatch is an ordinary value.
//!
//! # Commit on consumption
//!
//! An alternation only moves on to its next branch when the previous branch
//! failed without consuming input. A branch that consumed input and then
//! failed is reported as-is, which keeps error positions precise and parsing
//! linear. [`Parser::attempt`] opts a branch back into backtracking.
//!
//! ```
//! use weft_core::{literal, Outcome};
//!
//! let ab = literal("a").then(literal("b")).map(|(a, b)| a + &b);
//! let choice = ab.or(literal("a"));
//! assert_eq!(choice.parse("a"), Outcome::failure(1, "\"b\""));
//! ```
//!
//! # Recursion
//!
//! Self-referential rules go through [`recursive`] or [`lazy`]. Each entry
//! is charged against a per-thread depth budget and grows the native stack
//! on demand; running out of budget is a [`StackExhausted`] condition, never
//! a parse failure. [`Parser::parse_guarded`] and [`Parser::parse_with`]
//! return it as a value.

mod choice;
mod error;
mod outcome;
mod parser;
mod primitive;
mod repeat;

pub use choice::{one_of, one_of_labeled};
pub use error::{GrammarError, Location, ParseFailure};
pub use outcome::{Expected, Outcome};
pub use parser::{ParseOptions, Parser};
pub use primitive::{
    end, fail, lazy, literal, literals, pattern, pattern_skip, recursive, succeed, Pattern,
    END_OF_INPUT,
};

pub use weft_stack::{silence_exhaustion_reports, StackExhausted, DEFAULT_DEPTH_LIMIT};
