//! Primitive parsers.
//!
//! Every primitive is normalized at construction into the one canonical
//! [`Parser`] shape; nothing on the evaluation path inspects what kind of
//! primitive it is running. Pattern-based primitives compile their regex
//! here, once, and own it privately.

use std::sync::{Arc, OnceLock};

use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};
use tracing::{debug, trace};

use crate::error::GrammarError;
use crate::outcome::{Expected, Outcome};
use crate::parser::Parser;

/// Failure label of [`end`].
pub const END_OF_INPUT: &str = "end of input";

const UNBOUND_RECURSIVE: &str = "an unbound recursive parser";

/// Label a literal the way failures report it: quoted and escaped.
fn quote(text: &str) -> String {
    format!("{text:?}")
}

/// Match `text` exactly at the current position.
///
/// Succeeds with `text` itself; fails expecting the quoted literal.
pub fn literal(text: impl Into<String>) -> Parser<String> {
    let text: String = text.into();
    let expected = Expected::label(quote(&text));
    Parser::new(move |input: &str, start| {
        if input
            .get(start..)
            .is_some_and(|rest| rest.starts_with(text.as_str()))
        {
            Outcome::success(start + text.len(), text.clone())
        } else {
            Outcome::failure(start, expected.clone())
        }
    })
}

/// Match the longest of several literals at the current position.
///
/// Candidates are tried longest first, so when one is a prefix of another
/// the longer one wins. On failure the expected labels follow the order the
/// candidates were given in.
pub fn literals<S: Into<String>>(
    candidates: impl IntoIterator<Item = S>,
) -> Result<Parser<String>, GrammarError> {
    let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
    if candidates.is_empty() {
        return Err(GrammarError::EmptyLiteralSet);
    }
    let expected = Expected::many(candidates.iter().map(|c| Expected::label(quote(c))));

    let mut longest_first: Vec<&str> = candidates.iter().map(String::as_str).collect();
    longest_first.sort_by(|a, b| b.len().cmp(&a.len()));
    let source = longest_first
        .iter()
        .map(|c| regex_syntax::escape(c))
        .collect::<Vec<_>>()
        .join("|");

    Pattern::new(source).expected(expected).matching()
}

/// A regular expression primitive under construction.
///
/// The compiled expression is always anchored at the current position: it
/// never skips ahead to find a match.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    case_insensitive: bool,
    expected: Option<Expected>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Pattern {
            source: source.into(),
            case_insensitive: false,
            expected: None,
        }
    }

    #[must_use]
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Replace the default failure label.
    #[must_use]
    pub fn expected(mut self, expected: impl Into<Expected>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// The failure label: the override if set, otherwise `/source/` with an
    /// `i` suffix for case-insensitive patterns.
    pub fn label(&self) -> Expected {
        match &self.expected {
            Some(expected) => expected.clone(),
            None => {
                let flags = if self.case_insensitive { "i" } else { "" };
                Expected::label(format!("/{}/{flags}", self.source))
            }
        }
    }

    /// Build a parser returning the matched text.
    pub fn matching(self) -> Result<Parser<String>, GrammarError> {
        let expected = self.label();
        let regex = self.compile()?;
        Ok(Parser::new(move |input: &str, start| {
            match anchored_match(&regex, input, start) {
                Some((end, text)) => Outcome::success(end, text.to_owned()),
                None => Outcome::failure(start, expected.clone()),
            }
        }))
    }

    /// Build a parser that consumes the match and returns nothing.
    pub fn skipping(self) -> Result<Parser<()>, GrammarError> {
        let expected = self.label();
        let regex = self.compile()?;
        Ok(Parser::new(move |input: &str, start| {
            match anchored_match(&regex, input, start) {
                Some((end, _)) => Outcome::success(end, ()),
                None => Outcome::failure(start, expected.clone()),
            }
        }))
    }

    fn compile(&self) -> Result<Regex, GrammarError> {
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(self.case_insensitive))
            .build(&self.source)
            .map_err(|source| GrammarError::InvalidPattern {
                pattern: self.source.clone(),
                source: Box::new(source),
            })?;
        debug!(
            pattern = %self.source,
            case_insensitive = self.case_insensitive,
            "compiled pattern"
        );
        Ok(regex)
    }
}

/// Run `regex` anchored at `start`, returning the end position and the
/// matched text.
fn anchored_match<'i>(regex: &Regex, input: &'i str, start: usize) -> Option<(usize, &'i str)> {
    if start > input.len() {
        return None;
    }
    let search = Input::new(input).range(start..).anchored(Anchored::Yes);
    let end = regex.find(search)?.end();
    input.get(start..end).map(|text| (end, text))
}

/// Match a regular expression at the current position, returning the text.
pub fn pattern(source: &str) -> Result<Parser<String>, GrammarError> {
    Pattern::new(source).matching()
}

/// Match a regular expression at the current position, returning nothing.
pub fn pattern_skip(source: &str) -> Result<Parser<()>, GrammarError> {
    Pattern::new(source).skipping()
}

/// Succeed only at the end of the input. Never advances.
pub fn end() -> Parser<()> {
    Parser::new(|input: &str, start| {
        if start == input.len() {
            Outcome::success(start, ())
        } else {
            Outcome::failure(start, END_OF_INPUT)
        }
    })
}

/// Succeed with `value` without consuming anything.
pub fn succeed<T, I>(value: T) -> Parser<T, I>
where
    T: Clone + Send + Sync + 'static,
    I: ?Sized + 'static,
{
    Parser::new(move |_, start| Outcome::success(start, value.clone()))
}

/// Fail with `expected` without consuming anything.
pub fn fail<T, I>(expected: impl Into<Expected>) -> Parser<T, I>
where
    T: 'static,
    I: ?Sized + 'static,
{
    let expected = expected.into();
    Parser::new(move |_, start| Outcome::failure(start, expected.clone()))
}

/// Defer obtaining a parser until it is run.
///
/// This is how grammars refer to rules that are not built yet, including
/// themselves. Every entry counts as one level of recursion against the
/// thread's depth budget and grows the stack when it runs low.
pub fn lazy<T, I, F>(supplier: F) -> Parser<T, I>
where
    T: 'static,
    I: ?Sized + 'static,
    F: Fn() -> Parser<T, I> + Send + Sync + 'static,
{
    Parser::new(move |input, start| {
        weft_stack::recurse(|| {
            trace!(start, depth = weft_stack::current_depth(), "lazy");
            supplier().run(input, start)
        })
    })
}

/// Build a parser that refers to itself.
///
/// `build` receives a handle to the parser being defined and returns its
/// definition. The handle only holds a weak reference, so the finished
/// grammar does not keep itself alive.
///
/// ```
/// use weft_core::{literal, recursive, succeed};
///
/// // nested = "(" nested ")" | ""
/// let nested = recursive(|nested| {
///     nested
///         .between(literal("("), literal(")"))
///         .map(|depth: usize| depth + 1)
///         .or(succeed(0))
/// });
/// assert_eq!(nested.parse("((()))").unwrap(), 3);
/// ```
pub fn recursive<T, I, F>(build: F) -> Parser<T, I>
where
    T: 'static,
    I: ?Sized + 'static,
    F: FnOnce(Parser<T, I>) -> Parser<T, I>,
{
    let slot: Arc<OnceLock<Parser<T, I>>> = Arc::new(OnceLock::new());
    let weak = Arc::downgrade(&slot);
    let handle = lazy(move || {
        weak.upgrade()
            .and_then(|slot| slot.get().cloned())
            .unwrap_or_else(|| fail(UNBOUND_RECURSIVE))
    });
    let built = slot.get_or_init(|| build(handle)).clone();
    // `slot` is the only strong owner; the handle inside `built` resolves
    // through it for as long as this parser lives.
    Parser::new(move |input, start| {
        debug_assert!(slot.get().is_some());
        built.run(input, start)
    })
}
