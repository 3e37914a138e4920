//! S-expressions: atoms, integers and parenthesized lists.

use std::fmt;

use tracing::debug;
use weft_core::{end, literal, one_of, pattern_skip, recursive, GrammarError, Parser, Pattern};

use crate::{trimmed, Grammar};

/// Any run of characters that are neither whitespace nor brackets.
const ATOM: &str = r"[^()\[\]{}\s]+";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sexpr {
    Atom(String),
    /// An atom made only of decimal digits that fits in an `i64`.
    Integer(i64),
    List(Vec<Sexpr>),
}

impl Sexpr {
    fn classify(text: String) -> Sexpr {
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Sexpr::Atom(text);
        }
        match text.parse() {
            Ok(n) => Sexpr::Integer(n),
            Err(_) => Sexpr::Atom(text),
        }
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Atom(text) => f.write_str(text),
            Sexpr::Integer(n) => write!(f, "{n}"),
            Sexpr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// S-expression grammar.
#[derive(Clone, Debug)]
pub struct SexprParser {
    parser: Parser<Sexpr>,
}

impl SexprParser {
    pub fn new() -> Result<Self, GrammarError> {
        let whitespace = pattern_skip(r"\s*")?;
        let atom = Pattern::new(ATOM)
            .expected("an atom")
            .matching()?
            .map(Sexpr::classify)
            .then_skip(whitespace.clone());

        let value = recursive(|value: Parser<Sexpr>| {
            let list = value
                .repeat()
                .between(literal("("), literal(")"))
                .map(Sexpr::List)
                .then_skip(whitespace);
            one_of([atom, list])
        });

        debug!("built s-expression grammar");
        Ok(SexprParser {
            parser: value.then_skip(end()),
        })
    }
}

impl Grammar for SexprParser {
    type Output = Sexpr;

    fn parser(&self) -> &Parser<Sexpr> {
        &self.parser
    }

    fn bounds<'i>(&self, input: &'i str) -> (&'i str, usize) {
        trimmed(input)
    }
}
