//! The parser value and its sequencing combinators.
//!
//! A [`Parser`] wraps a deterministic evaluation function
//! `(input, position) -> Outcome`. It is immutable and cheap to clone, so a
//! grammar is built once and then shared by any number of parse calls, on
//! any number of threads.
//!
//! Sequencing is strictly left to right. If a step fails, its failure is
//! returned unchanged; the next step starts exactly where the previous one
//! stopped.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use weft_stack::{StackExhausted, DEFAULT_DEPTH_LIMIT};

use crate::outcome::{chain, Expected, Outcome};

type RunFn<T, I> = dyn Fn(&I, usize) -> Outcome<T> + Send + Sync;

/// An immutable parser producing `T` from input of type `I`.
///
/// The text primitives in this crate work on `str`; the combinators work on
/// any input type a custom [`Parser::new`] function can address by position.
pub struct Parser<T, I: ?Sized = str> {
    run: Arc<RunFn<T, I>>,
}

impl<T, I: ?Sized> Clone for Parser<T, I> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T, I: ?Sized> fmt::Debug for Parser<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Settings for a single guarded parse call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Position to start parsing at.
    pub start: usize,
    /// Nested recursion points allowed before the parse is abandoned with
    /// [`StackExhausted`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            start: 0,
            max_depth: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<T, I: ?Sized> Parser<T, I> {
    /// Wrap an evaluation function.
    ///
    /// The function must not report a success position before `position`.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&I, usize) -> Outcome<T> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(run) }
    }

    /// Evaluate at `position` without logging.
    ///
    /// This is what combinators call; use [`Parser::parse_at`] from outside.
    #[inline]
    pub fn run(&self, input: &I, position: usize) -> Outcome<T> {
        (self.run)(input, position)
    }

    /// Parse from the start of `input`.
    ///
    /// # Panics
    ///
    /// Raises a [`StackExhausted`] panic if the grammar recurses past the
    /// thread's depth budget. Use [`Parser::parse_guarded`] to receive it as
    /// a value instead.
    pub fn parse(&self, input: &I) -> Outcome<T> {
        self.parse_at(input, 0)
    }

    /// Parse starting at `start`.
    ///
    /// # Panics
    ///
    /// Same as [`Parser::parse`].
    pub fn parse_at(&self, input: &I, start: usize) -> Outcome<T> {
        debug!(start, "parse started");
        let outcome = self.run(input, start);
        debug!(
            start,
            position = outcome.position(),
            success = outcome.is_success(),
            "parse finished"
        );
        outcome
    }

    /// Parse from the start of `input`, returning depth exhaustion as `Err`.
    pub fn parse_guarded(&self, input: &I) -> Result<Outcome<T>, StackExhausted> {
        weft_stack::catch_exhaustion(|| self.parse(input))
    }

    /// Parse with explicit options, returning depth exhaustion as `Err`.
    pub fn parse_with(
        &self,
        input: &I,
        options: &ParseOptions,
    ) -> Result<Outcome<T>, StackExhausted> {
        weft_stack::catch_exhaustion(|| {
            weft_stack::with_depth_limit(options.max_depth, || self.parse_at(input, options.start))
        })
    }

    /// Apply `f` to this parser. Handy for reusable grammar fragments in a
    /// method chain.
    pub fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}

// === Sequencing combinators ===

impl<T: 'static, I: ?Sized + 'static> Parser<T, I> {
    /// Transform the success value.
    pub fn map<U, F>(self, f: F) -> Parser<U, I>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |input, start| self.run(input, start).map(&f))
    }

    /// Transform the success value with a conversion that may reject it.
    ///
    /// A rejection becomes a failure at the position the match ended, like
    /// [`Parser::filter`].
    pub fn try_map<U, F>(self, f: F) -> Parser<U, I>
    where
        F: Fn(T) -> Result<U, Expected> + Send + Sync + 'static,
    {
        Parser::new(move |input, start| {
            let (position, value) = chain!(self.run(input, start));
            match f(value) {
                Ok(value) => Outcome::success(position, value),
                Err(expected) => Outcome::failure(position, expected),
            }
        })
    }

    /// Turn a success whose value fails `predicate` into a failure at the
    /// success position, expecting `expected`.
    pub fn filter<F>(self, predicate: F, expected: impl Into<Expected>) -> Parser<T, I>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let expected = expected.into();
        Parser::new(move |input, start| match self.run(input, start) {
            Outcome::Success { position, value } if !predicate(&value) => {
                Outcome::failure(position, expected.clone())
            }
            outcome => outcome,
        })
    }

    /// Succeed with `default` where this parser fails without consuming.
    ///
    /// A failure after consuming input is still returned as-is.
    pub fn optional(self, default: T) -> Parser<T, I>
    where
        T: Clone + Send + Sync,
    {
        Parser::new(move |input, start| match self.run(input, start) {
            outcome if outcome.failed_without_progress(start) => {
                Outcome::success(start, default.clone())
            }
            outcome => outcome,
        })
    }

    /// Run this parser, then the parser chosen from its value.
    pub fn bind<U, F>(self, next: F) -> Parser<U, I>
    where
        F: Fn(T) -> Parser<U, I> + Send + Sync + 'static,
    {
        Parser::new(move |input, start| {
            let (position, value) = chain!(self.run(input, start));
            next(value).run(input, position)
        })
    }

    /// Sequence two parsers, keeping both values.
    pub fn then<U: 'static>(self, next: Parser<U, I>) -> Parser<(T, U), I> {
        Parser::new(move |input, start| {
            let (position, left) = chain!(self.run(input, start));
            next.run(input, position).map(|right| (left, right))
        })
    }

    /// Sequence two parsers, keeping the left value.
    pub fn then_skip<U: 'static>(self, next: Parser<U, I>) -> Parser<T, I> {
        Parser::new(move |input, start| {
            let (position, value) = chain!(self.run(input, start));
            let (position, _) = chain!(next.run(input, position));
            Outcome::success(position, value)
        })
    }

    /// Sequence two parsers, keeping the right value.
    pub fn skip_then<U: 'static>(self, next: Parser<U, I>) -> Parser<U, I> {
        Parser::new(move |input, start| {
            let (position, _) = chain!(self.run(input, start));
            next.run(input, position)
        })
    }

    /// Parse `open`, this parser, then `close`; keep this parser's value.
    pub fn between<A: 'static, B: 'static>(
        self,
        open: Parser<A, I>,
        close: Parser<B, I>,
    ) -> Parser<T, I> {
        Parser::new(move |input, start| {
            let (position, _) = chain!(open.run(input, start));
            let (position, value) = chain!(self.run(input, position));
            let (position, _) = chain!(close.run(input, position));
            Outcome::success(position, value)
        })
    }
}
