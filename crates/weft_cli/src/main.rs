//! weft command-line front end.
//!
//! Parses files (or standard input) with one of the bundled grammars and
//! prints each value, or a `file:line:col: expected ...` diagnostic.

mod args;
mod report;

use std::fmt;
use std::io::{self, Read};
use std::process::ExitCode;

use tracing::info;
use weft_core::{GrammarError, ParseOptions};
use weft_grammars::{Arithmetic, Grammar, JsonParser, SexprParser};

use args::{parse_args, Args, GrammarKind, MAX_DEPTH_VAR};
use report::{run, Report, Source};

/// Install the tree-shaped tracing subscriber on stderr.
///
/// Nothing is installed unless `WEFT_LOG` (or, failing that, `RUST_LOG`) is
/// set, e.g. `WEFT_LOG=weft_core=trace`.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};
    use tracing_tree::HierarchicalLayer;

    let Some(directives) = ["WEFT_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|var| std::env::var(var).ok())
    else {
        return;
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(
            HierarchicalLayer::new(2)
                .with_writer(io::stderr)
                .with_targets(true),
        )
        .init();
}

fn print_usage() {
    println!("weft: parse inputs with a bundled grammar");
    println!();
    println!("Usage: weft <grammar> [files...] [options]");
    println!();
    println!("Grammars:");
    println!("  json                 JSON values, printed back compactly");
    println!("  arith                Integer arithmetic, printed as the result");
    println!("  sexpr                S-expressions, printed back normalized");
    println!();
    println!("With no files, standard input is parsed.");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Nesting allowed before a parse is abandoned");
    println!("                       (default: {}, or ${MAX_DEPTH_VAR})", weft_core::DEFAULT_DEPTH_LIMIT);
    println!();
    println!("Environment:");
    println!("  WEFT_LOG             Tracing filter, e.g. weft_core=debug");
}

fn read_sources(args: &Args) -> Vec<Source> {
    if args.files.is_empty() {
        let mut text = String::new();
        let text = match io::stdin().read_to_string(&mut text) {
            Ok(_) => Ok(text),
            Err(e) => Err(e.to_string()),
        };
        return vec![Source {
            name: "<stdin>".to_owned(),
            text,
        }];
    }
    args.files
        .iter()
        .map(|path| Source {
            name: path.display().to_string(),
            text: std::fs::read_to_string(path).map_err(|e| e.to_string()),
        })
        .collect()
}

fn run_with<G>(
    grammar: Result<G, GrammarError>,
    sources: &[Source],
    options: &ParseOptions,
) -> Result<Vec<Report>, GrammarError>
where
    G: Grammar,
    G::Output: fmt::Display,
{
    Ok(run(&grammar?, sources, options))
}

fn main() -> ExitCode {
    init_tracing();
    // Exhausted parses are reported per input below.
    weft_core::silence_exhaustion_reports();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("help" | "--help" | "-h")) {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let env_max_depth = std::env::var(MAX_DEPTH_VAR).ok();
    let args = match parse_args(&argv, env_max_depth.as_deref()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Usage: weft <json|arith|sexpr> [files...] [--max-depth=<n>]");
            return ExitCode::FAILURE;
        }
    };

    let sources = read_sources(&args);
    info!(
        grammar = ?args.grammar,
        inputs = sources.len(),
        max_depth = args.options.max_depth,
        "parsing"
    );

    let reports = match args.grammar {
        GrammarKind::Json => run_with(JsonParser::new(), &sources, &args.options),
        GrammarKind::Arith => run_with(Arithmetic::new(), &sources, &args.options),
        GrammarKind::Sexpr => run_with(SexprParser::new(), &sources, &args.options),
    };
    let reports = match reports {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for report in &reports {
        match report {
            Report::Value(value) => println!("{value}"),
            Report::Error(message) => eprintln!("{message}"),
        }
    }
    if reports.iter().any(Report::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
