//! Repetition and precedence-climbing folds.
//!
//! Repetition follows the same progress rule as alternation: an element
//! that fails without consuming input ends the sequence normally, while an
//! element that fails after consuming input is a hard error. A partially
//! built sequence is never returned as a success in that case.

use tracing::trace;

use crate::outcome::{chain, Outcome};
use crate::parser::Parser;

impl<T: 'static, I: ?Sized + 'static> Parser<T, I> {
    /// Apply this parser as many times as it matches.
    ///
    /// Always succeeds unless an application fails after consuming input.
    /// An application that succeeds without consuming input also ends the
    /// repetition and its value is dropped.
    pub fn repeat(self) -> Parser<Vec<T>, I> {
        Parser::new(move |input, start| {
            let mut values = Vec::new();
            let mut cursor = start;
            loop {
                match self.run(input, cursor) {
                    Outcome::Success { position, value } if position > cursor => {
                        values.push(value);
                        cursor = position;
                    }
                    Outcome::Success { .. } => {
                        trace!(cursor, "repeat element matched nothing");
                        return Outcome::success(cursor, values);
                    }
                    Outcome::Failure { position, .. } if position <= cursor => {
                        return Outcome::success(cursor, values);
                    }
                    Outcome::Failure { position, expected } => {
                        return Outcome::Failure { position, expected };
                    }
                }
            }
        })
    }

    /// Apply this parser exactly `count` times.
    ///
    /// Any failure is returned as-is; there is no partial success.
    pub fn repeat_exact(self, count: usize) -> Parser<Vec<T>, I> {
        Parser::new(move |input, start| {
            let mut values = Vec::new();
            let mut cursor = start;
            for _ in 0..count {
                let (position, value) = chain!(self.run(input, cursor));
                values.push(value);
                cursor = position;
            }
            Outcome::success(cursor, values)
        })
    }

    /// Parse a `delimiter`-separated sequence of this parser.
    ///
    /// Matching nothing at all is an empty success. Once a delimiter has
    /// matched, the element after it is mandatory: a dangling delimiter is
    /// an error, never silently dropped.
    pub fn join<D: 'static>(self, delimiter: Parser<D, I>) -> Parser<Vec<T>, I> {
        Parser::new(move |input, start| {
            let mut values = Vec::new();
            let mut cursor = match self.run(input, start) {
                Outcome::Success { position, value } => {
                    values.push(value);
                    position
                }
                Outcome::Failure { position, .. } if position <= start => {
                    return Outcome::success(start, values);
                }
                Outcome::Failure { position, expected } => {
                    return Outcome::Failure { position, expected };
                }
            };
            loop {
                let after_delimiter = match delimiter.run(input, cursor) {
                    Outcome::Success { position, .. } => position,
                    Outcome::Failure { position, .. } if position <= cursor => {
                        return Outcome::success(cursor, values);
                    }
                    Outcome::Failure { position, expected } => {
                        return Outcome::Failure { position, expected };
                    }
                };
                let (position, value) = chain!(self.run(input, after_delimiter));
                if position == cursor {
                    trace!(cursor, "join round matched nothing");
                    return Outcome::success(cursor, values);
                }
                values.push(value);
                cursor = position;
            }
        })
    }

    /// Parse `operand (operator operand)*` and fold it left-associatively.
    ///
    /// `1-2-3` folds as `(1-2)-3`.
    pub fn chain_left<F>(self, operator: Parser<F, I>) -> Parser<T, I>
    where
        F: Fn(T, T) -> T + 'static,
    {
        self.clone()
            .then(operator.then(self).repeat())
            .map(|(head, tail)| tail.into_iter().fold(head, |acc, (op, rhs)| op(acc, rhs)))
    }

    /// Parse `operand (operator operand)*` and fold it right-associatively.
    ///
    /// `2**3**2` folds as `2**(3**2)`.
    pub fn chain_right<F>(self, operator: Parser<F, I>) -> Parser<T, I>
    where
        F: Fn(T, T) -> T + 'static,
    {
        self.clone()
            .then(operator.then(self).repeat())
            .map(|(head, tail)| fold_right(head, tail))
    }
}

/// Fold `head op1 x1 op2 x2 ... opN xN` from the right: each operator is
/// applied to the operand on its left and everything already folded on its
/// right.
fn fold_right<T, F: Fn(T, T) -> T>(head: T, tail: Vec<(F, T)>) -> T {
    let mut rest = tail.into_iter().rev();
    let Some((mut op, mut acc)) = rest.next() else {
        return head;
    };
    for (prev_op, operand) in rest {
        acc = op(operand, acc);
        op = prev_op;
    }
    op(head, acc)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
