//! Parsing inputs and rendering the results.

use std::fmt;

use rayon::prelude::*;
use tracing::debug;
use weft_core::ParseOptions;
use weft_grammars::Grammar;

/// One named input: a file path, or `<stdin>`.
#[derive(Clone, Debug)]
pub struct Source {
    pub name: String,
    /// File contents, or the error message if the file could not be read.
    pub text: Result<String, String>,
}

/// What to print for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// The parsed value, serialized.
    Value(String),
    /// A diagnostic line, `name:line:col: expected ...` for parse failures.
    Error(String),
}

impl Report {
    pub fn is_error(&self) -> bool {
        matches!(self, Report::Error(_))
    }
}

/// Parse every source with one shared grammar, in parallel.
///
/// Reports come back in source order.
pub fn run<G>(grammar: &G, sources: &[Source], options: &ParseOptions) -> Vec<Report>
where
    G: Grammar,
    G::Output: fmt::Display,
{
    sources
        .par_iter()
        .map(|source| describe(grammar, source, options))
        .collect()
}

fn describe<G>(grammar: &G, source: &Source, options: &ParseOptions) -> Report
where
    G: Grammar,
    G::Output: fmt::Display,
{
    let text = match &source.text {
        Ok(text) => text,
        Err(message) => return Report::Error(format!("{}: {message}", source.name)),
    };
    debug!(source = %source.name, bytes = text.len(), "parsing");
    match grammar.parse_with(text, options) {
        Ok(outcome) => match outcome.into_result() {
            Ok(value) => Report::Value(value.to_string()),
            Err(failure) => Report::Error(format!(
                "{}:{}: expected {}",
                source.name,
                failure.location(text),
                failure.expected
            )),
        },
        Err(exhausted) => Report::Error(format!("{}: {exhausted}", source.name)),
    }
}
