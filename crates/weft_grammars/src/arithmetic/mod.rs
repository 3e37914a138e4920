//! Integer arithmetic evaluated over `f64`.
//!
//! Precedence, loosest first:
//!
//! | Operators | Associativity |
//! |-----------|---------------|
//! | `+` `-` | left |
//! | `*` `/` | left |
//! | `**` | right |
//! | prefix `-` `~` | - |
//!
//! Operands are decimal integers or parenthesized expressions. No
//! whitespace is accepted anywhere.

use tracing::debug;
use weft_core::{
    end, literal, one_of, recursive, Expected, GrammarError, Outcome, Parser, Pattern,
};

use crate::Grammar;

type Unary = fn(f64) -> f64;
type Binary = fn(f64, f64) -> f64;

/// Arithmetic expression evaluator.
#[derive(Clone, Debug)]
pub struct Arithmetic {
    parser: Parser<f64>,
}

impl Arithmetic {
    pub fn new() -> Result<Self, GrammarError> {
        let integer = Pattern::new("[0-9]+")
            .expected("an integer")
            .matching()?
            .try_map(|digits| digits.parse::<f64>().map_err(|_| Expected::label("an integer")));

        let expr = recursive(|expr: Parser<f64>| {
            let atom = integer.or(expr.between(literal("("), literal(")")));
            let operand = one_of([unary("-", |x| -x), unary("~", bitwise_not)])
                .repeat()
                .then(atom)
                .map(|(prefixes, value)| prefixes.into_iter().rev().fold(value, |acc, op| op(acc)));

            operand
                .chain_right(binary("**", f64::powf))
                .chain_left(one_of([binary("*", |l, r| l * r), binary("/", |l, r| l / r)]))
                .chain_left(one_of([binary("+", |l, r| l + r), binary("-", |l, r| l - r)]))
        });

        debug!("built arithmetic grammar");
        Ok(Arithmetic {
            parser: expr.then_skip(end()),
        })
    }

    /// Evaluate `input`, which must be a single expression and nothing else.
    pub fn evaluate(&self, input: &str) -> Outcome<f64> {
        self.parse(input)
    }
}

impl Grammar for Arithmetic {
    type Output = f64;

    fn parser(&self) -> &Parser<f64> {
        &self.parser
    }
}

fn unary(symbol: &str, op: Unary) -> Parser<Unary> {
    literal(symbol).map(move |_| op)
}

fn binary(symbol: &str, op: Binary) -> Parser<Binary> {
    literal(symbol).map(move |_| op)
}

/// Bitwise complement of the value's 32-bit two's-complement integer form.
///
/// The value is truncated toward zero and wrapped modulo 2^32; NaN and
/// infinities count as zero.
fn bitwise_not(x: f64) -> f64 {
    f64::from(!to_i32_wrapping(x))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "value is reduced into u32 range before the casts"
)]
fn to_i32_wrapping(x: f64) -> i32 {
    if !x.is_finite() {
        return 0;
    }
    let wrapped = x.trunc().rem_euclid(4_294_967_296.0);
    (wrapped as u32) as i32
}

#[cfg(test)]
#[allow(clippy::float_cmp, reason = "results are exact")]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
