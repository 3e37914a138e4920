//! Alternation with commit-on-consumption, and its escape hatch.
//!
//! Alternatives are tried in order, each from the same start position:
//!
//! - success: returned immediately
//! - failure after consuming input: returned immediately; the branch is
//!   committed and no later alternative runs
//! - failure without consuming input: the next alternative is tried
//!
//! Only when every alternative failed without consuming input are their
//! expectations merged, in order, into one failure at the start position.
//! Grammars with shared prefixes must be left-factored, or the branch
//! wrapped in [`Parser::attempt`].

use tracing::trace;

use crate::outcome::{Expected, Outcome};
use crate::parser::Parser;

impl<T: 'static, I: ?Sized + 'static> Parser<T, I> {
    /// Try this parser, then `other` if this one failed without consuming.
    pub fn or(self, other: Parser<T, I>) -> Parser<T, I> {
        Parser::new(move |input, start| {
            let first = match self.run(input, start) {
                Outcome::Failure { position, expected } if position <= start => expected,
                outcome => return outcome,
            };
            match other.run(input, start) {
                Outcome::Failure { position, expected } if position <= start => {
                    Outcome::failure(start, Expected::Many(vec![first, expected]))
                }
                outcome => outcome,
            }
        })
    }

    /// Make a failure after consuming input look like a failure without
    /// progress, so an enclosing alternation can fall through.
    ///
    /// The reported failure position becomes this parser's start position;
    /// the expected labels are kept.
    pub fn attempt(self) -> Parser<T, I> {
        Parser::new(move |input, start| match self.run(input, start) {
            Outcome::Failure { position, expected } if position > start => {
                trace!(start, position, "attempt rewound failure");
                Outcome::Failure {
                    position: start,
                    expected,
                }
            }
            outcome => outcome,
        })
    }
}

/// Run alternatives in order under the commit-on-consumption rule.
///
/// Returns the first outcome that is a success or a committed failure;
/// otherwise hands every zero-progress expectation to `fell_through` and
/// returns `None`.
fn first_committed<T, I: ?Sized>(
    alternatives: &[Parser<T, I>],
    input: &I,
    start: usize,
    mut fell_through: impl FnMut(Expected),
) -> Option<Outcome<T>> {
    for alternative in alternatives {
        match alternative.run(input, start) {
            Outcome::Failure { position, expected } if position <= start => fell_through(expected),
            outcome => return Some(outcome),
        }
    }
    None
}

/// Choose among several alternatives.
///
/// If all fail without consuming input, the failure expects every
/// alternative's labels, in order.
pub fn one_of<T, I>(alternatives: impl IntoIterator<Item = Parser<T, I>>) -> Parser<T, I>
where
    T: 'static,
    I: ?Sized + 'static,
{
    let alternatives: Vec<_> = alternatives.into_iter().collect();
    Parser::new(move |input, start| {
        let mut merged = Vec::with_capacity(alternatives.len());
        first_committed(&alternatives, input, start, |expected| merged.push(expected))
            .unwrap_or_else(|| Outcome::failure(start, Expected::Many(merged)))
    })
}

/// Choose among several alternatives, reporting `expected` instead of the
/// merged labels when all fail without consuming input.
pub fn one_of_labeled<T, I>(
    alternatives: impl IntoIterator<Item = Parser<T, I>>,
    expected: impl Into<Expected>,
) -> Parser<T, I>
where
    T: 'static,
    I: ?Sized + 'static,
{
    let alternatives: Vec<_> = alternatives.into_iter().collect();
    let expected = expected.into();
    Parser::new(move |input, start| {
        first_committed(&alternatives, input, start, |_| {})
            .unwrap_or_else(|| Outcome::failure(start, expected.clone()))
    })
}
