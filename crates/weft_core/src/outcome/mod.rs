//! Two-way parse outcome and the expected-label tree.
//!
//! Every parser returns an [`Outcome`]: either a success carrying the
//! position it stopped at and a value, or a failure carrying the furthest
//! position it reached and what it [`Expected`] to find there.
//!
//! Progress is not a separate flag. Comparing the outcome's position with
//! the position the parser started at tells the two failure kinds apart:
//!
//! | Result | Position | Meaning |
//! |--------|----------|---------|
//! | Failure | `== start` | Soft error: an enclosing alternation may try the next branch |
//! | Failure | `> start` | Hard error: the branch consumed input, report it as-is |

use std::fmt;
use std::sync::Arc;

use crate::error::ParseFailure;

/// What a parser was looking for when it failed.
///
/// Either a single label or an ordered sequence of sub-trees, as produced by
/// merging the failures of sibling alternatives. Order is preserved; labels
/// are neither sorted nor deduplicated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A single human-readable label, e.g. `"foo"` or `an integer`.
    Label(Arc<str>),
    /// Merged expectations of several alternatives.
    Many(Vec<Expected>),
}

impl Expected {
    /// Create a single label.
    pub fn label(label: impl Into<Arc<str>>) -> Self {
        Expected::Label(label.into())
    }

    /// Create a tree from sub-expectations, keeping their order.
    pub fn many(items: impl IntoIterator<Item = Expected>) -> Self {
        Expected::Many(items.into_iter().collect())
    }

    /// All labels in the tree, depth-first, left to right.
    pub fn labels(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expected::Label(label) => out.push(label),
            Expected::Many(items) => {
                for item in items {
                    item.collect_labels(out);
                }
            }
        }
    }
}

impl From<&str> for Expected {
    fn from(label: &str) -> Self {
        Expected::label(label)
    }
}

impl From<String> for Expected {
    fn from(label: String) -> Self {
        Expected::label(label)
    }
}

impl From<Arc<str>> for Expected {
    fn from(label: Arc<str>) -> Self {
        Expected::Label(label)
    }
}

impl From<Vec<Expected>> for Expected {
    fn from(items: Vec<Expected>) -> Self {
        Expected::Many(items)
    }
}

/// Renders the flattened labels as `a`, `a or b`, or `a, b, or c`.
impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        match labels.as_slice() {
            [] => f.write_str("nothing"),
            [only] => f.write_str(only),
            [first, second] => write!(f, "{first} or {second}"),
            [init @ .., last] => {
                for label in init {
                    write!(f, "{label}, ")?;
                }
                write!(f, "or {last}")
            }
        }
    }
}

/// The result of running a parser at a position.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    /// The parser matched, ending at `position`.
    Success {
        /// Position just past the matched input.
        position: usize,
        /// The produced value.
        value: T,
    },
    /// The parser did not match.
    Failure {
        /// Furthest position reached during the attempt.
        position: usize,
        /// What was expected at `position`.
        expected: Expected,
    },
}

impl<T> Outcome<T> {
    // === Constructors ===

    #[inline]
    pub fn success(position: usize, value: T) -> Self {
        Outcome::Success { position, value }
    }

    #[cold]
    pub fn failure(position: usize, expected: impl Into<Expected>) -> Self {
        Outcome::Failure {
            position,
            expected: expected.into(),
        }
    }

    // === Predicates ===

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Where the parser stopped: the end of the match on success, the
    /// furthest point reached on failure.
    #[inline]
    pub fn position(&self) -> usize {
        match self {
            Outcome::Success { position, .. } | Outcome::Failure { position, .. } => *position,
        }
    }

    /// Returns `true` if this failed without getting past `start`.
    ///
    /// This is the condition under which an alternation may try its next
    /// branch, and under which a repetition ends normally.
    #[inline]
    pub fn failed_without_progress(&self, start: usize) -> bool {
        matches!(self, Outcome::Failure { position, .. } if *position <= start)
    }

    // === Accessors ===

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<&Expected> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { expected, .. } => Some(expected),
        }
    }

    // === Transformations ===

    /// Map the success value, keeping the position.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success { position, value } => Outcome::Success {
                position,
                value: f(value),
            },
            Outcome::Failure { position, expected } => Outcome::Failure { position, expected },
        }
    }

    /// Convert to Option, discarding failure information.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    /// Convert to `Result`, dropping the success position.
    pub fn into_result(self) -> Result<T, ParseFailure> {
        match self {
            Outcome::Success { value, .. } => Ok(value),
            Outcome::Failure { position, expected } => Err(ParseFailure { position, expected }),
        }
    }

    /// Unwrap the success value, panicking on failure.
    ///
    /// # Panics
    /// Panics if this is a failure.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Success { value, .. } => value,
            Outcome::Failure { position, expected } => {
                panic!("called `Outcome::unwrap()` on a failure at position {position}: expected {expected}")
            }
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, ParseFailure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Unpack a success into `(position, value)`, or return the failure from the
/// enclosing evaluation function, re-typed for its output.
macro_rules! chain {
    ($outcome:expr) => {
        match $outcome {
            $crate::outcome::Outcome::Success { position, value } => (position, value),
            $crate::outcome::Outcome::Failure { position, expected } => {
                return $crate::outcome::Outcome::Failure { position, expected };
            }
        }
    };
}

pub(crate) use chain;

#[cfg(test)]
mod tests;
