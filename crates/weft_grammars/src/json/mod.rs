//! JSON values: parsing and serialization.
//!
//! Object members keep their source order and duplicates. Serializing a
//! parsed value with [`Display`](fmt::Display) and parsing the result again
//! gives back an equal value.

use std::fmt::{self, Write as _};

use tracing::debug;
use weft_core::{
    end, literals, one_of_labeled, recursive, Expected, GrammarError, Parser, Pattern,
};

use crate::{trimmed, Grammar};

const STRING: &str = r#""(?:[^\\"\t\n\r\x00]+|\\(?:[bfnrtv"\\/]|u[0-9a-fA-F]{4}))*""#;
const NUMBER: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

/// A parsed JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
}

/// JSON grammar.
#[derive(Clone, Debug)]
pub struct JsonParser {
    parser: Parser<Json>,
}

impl JsonParser {
    pub fn new() -> Result<Self, GrammarError> {
        let string = Pattern::new(STRING)
            .expected("a string")
            .matching()?
            .try_map(|raw| unescape(&raw).ok_or_else(|| Expected::label("a string")));
        let number = Pattern::new(NUMBER)
            .expected("a number")
            .matching()?
            .try_map(|text| match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(Expected::label("a number")),
            });
        let keyword = literals(["true", "false", "null"])?.map(|word| match word.as_str() {
            "true" => Json::Bool(true),
            "false" => Json::Bool(false),
            _ => Json::Null,
        });

        let comma = punctuation(',')?;
        let colon = punctuation(':')?;
        let open_bracket = punctuation('[')?;
        let close_bracket = punctuation(']')?;
        let open_brace = punctuation('{')?;
        let close_brace = punctuation('}')?;

        let value = recursive(|value: Parser<Json>| {
            let array = value
                .clone()
                .join(comma.clone())
                .between(open_bracket, close_bracket)
                .map(Json::Array);
            let object = string
                .clone()
                .then_skip(colon)
                .then(value)
                .join(comma)
                .between(open_brace, close_brace)
                .map(Json::Object);
            one_of_labeled(
                [
                    string.map(Json::String),
                    number.map(Json::Number),
                    object,
                    array,
                    keyword,
                ],
                Expected::many(
                    ["a string", "a number", "an object", "an array", "a keyword"]
                        .map(Expected::label),
                ),
            )
        });

        debug!("built json grammar");
        Ok(JsonParser {
            parser: value.then_skip(end()),
        })
    }
}

impl Grammar for JsonParser {
    type Output = Json;

    fn parser(&self) -> &Parser<Json> {
        &self.parser
    }

    fn bounds<'i>(&self, input: &'i str) -> (&'i str, usize) {
        trimmed(input)
    }
}

/// A single punctuation character with any JSON whitespace around it.
///
/// One pattern covers the whitespace and the character, so a miss never
/// consumes input and the enclosing `join` or alternation can move on.
fn punctuation(symbol: char) -> Result<Parser<()>, GrammarError> {
    let escaped = regex_syntax::escape(symbol.encode_utf8(&mut [0; 4]));
    Pattern::new(format!("[ \\t\\r\\n]*{escaped}[ \\t\\r\\n]*"))
        .expected(symbol.to_string())
        .skipping()
}

/// Decode a quoted string token, quotes included.
///
/// `\uXXXX` escapes forming a surrogate pair are joined; a lone surrogate
/// decodes to U+FFFD. Returns `None` if the token is malformed.
fn unescape(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            c @ ('"' | '\\' | '/') => c,
            'u' => {
                let unit = hex4(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    let mut lookahead = chars.clone();
                    let low = match (lookahead.next(), lookahead.next()) {
                        (Some('\\'), Some('u')) => hex4(&mut lookahead),
                        _ => None,
                    };
                    match low {
                        Some(low @ 0xDC00..=0xDFFF) => {
                            chars = lookahead;
                            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER)
                        }
                        _ => char::REPLACEMENT_CHARACTER,
                    }
                } else {
                    char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    (0..4).try_fold(0, |acc, _| Some(acc * 16 + chars.next()?.to_digit(16)?))
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Compact serialization. Non-finite numbers have no JSON form and are
/// written as `null`.
impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Json::Null => f.write_str("null"),
            Json::Bool(b) => write!(f, "{b}"),
            Json::Number(n) if n.is_finite() => write!(f, "{n}"),
            Json::Number(_) => f.write_str("null"),
            Json::String(s) => write_escaped(f, s),
            Json::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Json::Object(members) => {
                f.write_char('{')?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}
