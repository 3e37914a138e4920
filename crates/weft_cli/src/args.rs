//! Command-line arguments.

use std::path::PathBuf;

use weft_core::ParseOptions;

/// Environment variable consulted when `--max-depth` is not given.
pub const MAX_DEPTH_VAR: &str = "WEFT_MAX_DEPTH";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarKind {
    Json,
    Arith,
    Sexpr,
}

impl GrammarKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(GrammarKind::Json),
            "arith" => Some(GrammarKind::Arith),
            "sexpr" => Some(GrammarKind::Sexpr),
            _ => None,
        }
    }
}

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub grammar: GrammarKind,
    /// Files to parse; empty means standard input.
    pub files: Vec<PathBuf>,
    pub options: ParseOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing grammar name")]
    MissingGrammar,
    #[error("unknown grammar `{0}` (expected json, arith or sexpr)")]
    UnknownGrammar(String),
    #[error("invalid depth limit `{0}`: expected a positive integer")]
    InvalidMaxDepth(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

/// Parse `args` (without the program name).
///
/// `env_max_depth` is the value of [`MAX_DEPTH_VAR`], if set; an explicit
/// `--max-depth=N` takes precedence over it.
pub fn parse_args(args: &[String], env_max_depth: Option<&str>) -> Result<Args, ArgsError> {
    let (name, rest) = args.split_first().ok_or(ArgsError::MissingGrammar)?;
    let grammar =
        GrammarKind::from_name(name).ok_or_else(|| ArgsError::UnknownGrammar(name.clone()))?;

    let mut options = ParseOptions::default();
    if let Some(value) = env_max_depth {
        options.max_depth = parse_depth(value)?;
    }

    let mut files = Vec::new();
    for arg in rest {
        if let Some(value) = arg.strip_prefix("--max-depth=") {
            options.max_depth = parse_depth(value)?;
        } else if arg.starts_with("--") {
            return Err(ArgsError::UnknownOption(arg.clone()));
        } else {
            files.push(PathBuf::from(arg));
        }
    }

    Ok(Args {
        grammar,
        files,
        options,
    })
}

fn parse_depth(value: &str) -> Result<usize, ArgsError> {
    match value.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(ArgsError::InvalidMaxDepth(value.to_owned())),
    }
}
