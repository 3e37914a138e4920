//! Error types.
//!
//! Grammatical mismatch is not an error here: it is an ordinary
//! [`Outcome::Failure`](crate::Outcome::Failure). These types cover grammar
//! construction and the `Result` view of a failed outcome.

use std::fmt;

use crate::outcome::Expected;

/// A primitive could not be built.
///
/// Raised while the grammar is being constructed, before any input is seen.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("invalid pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },
    #[error("a literal set needs at least one candidate")]
    EmptyLiteralSet,
}

/// A failed outcome viewed as an error value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at position {position}")]
pub struct ParseFailure {
    pub position: usize,
    pub expected: Expected,
}

impl ParseFailure {
    /// Line and column (both 1-based, column in characters) of the failure
    /// position within `input`.
    pub fn location(&self, input: &str) -> Location {
        let mut end = self.position.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        let before = &input[..end];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
        Location { line, column }
    }
}

/// A human-facing source location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
