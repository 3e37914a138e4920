//! Complete grammars built from `weft_core` combinators.
//!
//! Each grammar is built once by its `new` constructor and can then parse any
//! number of inputs, from any number of threads. All of them require the
//! whole input to be consumed.
//!
//! | Grammar | Value | Whitespace |
//! |---------|-------|------------|
//! | [`Arithmetic`] | `f64` | none allowed |
//! | [`JsonParser`] | [`Json`] | around punctuation, input trimmed |
//! | [`SexprParser`] | [`Sexpr`] | after each element, input trimmed |

mod arithmetic;
mod json;
mod sexpr;

pub use arithmetic::Arithmetic;
pub use json::{Json, JsonParser};
pub use sexpr::{Sexpr, SexprParser};

use weft_core::{Outcome, ParseOptions, Parser, StackExhausted};

/// A ready-to-use grammar over text.
///
/// Positions in returned outcomes are byte offsets into the input exactly
/// as given, even for grammars that ignore surrounding whitespace.
pub trait Grammar: Send + Sync {
    type Output;

    /// The underlying parser, end-of-input check included.
    fn parser(&self) -> &Parser<Self::Output>;

    /// The slice of `input` the parser sees and the position to start at.
    fn bounds<'i>(&self, input: &'i str) -> (&'i str, usize) {
        (input, 0)
    }

    /// Parse all of `input`.
    ///
    /// # Panics
    ///
    /// Raises a [`StackExhausted`] panic on input nested past the thread's
    /// depth budget; see [`Grammar::parse_with`].
    fn parse(&self, input: &str) -> Outcome<Self::Output> {
        let (text, start) = self.bounds(input);
        self.parser().parse_at(text, start)
    }

    /// Parse all of `input` under an explicit depth budget, returning
    /// exhaustion as `Err`. The start position is chosen by the grammar.
    fn parse_with(
        &self,
        input: &str,
        options: &ParseOptions,
    ) -> Result<Outcome<Self::Output>, StackExhausted> {
        let (text, start) = self.bounds(input);
        self.parser().parse_with(text, &options.with_start(start))
    }
}

/// Drop surrounding whitespace without renumbering positions.
fn trimmed(input: &str) -> (&str, usize) {
    let text = input.trim_end();
    let start = text.len() - text.trim_start().len();
    (text, start)
}
