#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Deep recursion and sharing a grammar between threads.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use pretty_assertions::assert_eq;
use weft_core::{
    end, literal, recursive, succeed, Outcome, ParseOptions, Parser, StackExhausted,
    DEFAULT_DEPTH_LIMIT,
};

/// `nested = "[" nested "]" | ""`, counting the levels.
fn nesting() -> Parser<usize> {
    recursive(|nested: Parser<usize>| {
        nested
            .between(literal("["), literal("]"))
            .map(|depth| depth + 1)
            .or(succeed(0))
    })
    .then_skip(end())
}

fn brackets(depth: usize) -> String {
    format!("{}{}", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn nesting_within_budget_succeeds() {
    let input = brackets(5_000);
    assert_eq!(
        nesting().parse_guarded(&input),
        Ok(Outcome::success(10_000, 5_000))
    );
}

#[test]
fn exhaustion_is_not_a_parse_failure() {
    let input = brackets(DEFAULT_DEPTH_LIMIT + 10);
    assert_eq!(
        nesting().parse_guarded(&input),
        Err(StackExhausted {
            limit: DEFAULT_DEPTH_LIMIT
        })
    );
}

#[test]
fn exhaustion_unwinds_through_plain_parse() {
    let grammar = nesting();
    let input = brackets(200);
    let options = ParseOptions::default().with_max_depth(50);

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        weft_stack::with_depth_limit(options.max_depth, || grammar.parse(&input))
    }))
    .unwrap_err();
    assert_eq!(
        payload.downcast_ref::<StackExhausted>(),
        Some(&StackExhausted { limit: 50 })
    );

    // The thread is usable again afterwards.
    assert_eq!(grammar.parse("[[]]"), Outcome::success(4, 2));
}

#[test]
fn budget_is_per_call() {
    let grammar = nesting();
    let input = brackets(100);
    let tight = ParseOptions::default().with_max_depth(20);
    let roomy = ParseOptions::default().with_max_depth(1_000);

    assert_eq!(
        grammar.parse_with(&input, &tight),
        Err(StackExhausted { limit: 20 })
    );
    assert_eq!(
        grammar.parse_with(&input, &roomy),
        Ok(Outcome::success(200, 100))
    );
}

#[test]
fn one_grammar_many_threads() {
    let grammar = nesting();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|depth| {
                let grammar = &grammar;
                scope.spawn(move || grammar.parse(&brackets(depth * 100)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (depth, outcome) in results.into_iter().enumerate() {
        assert_eq!(outcome, Outcome::success(depth * 200, depth * 100));
    }
}

#[test]
fn exhaustion_on_one_thread_leaves_others_alone() {
    let grammar = nesting();
    thread::scope(|scope| {
        let deep = scope.spawn(|| {
            grammar.parse_with(&brackets(500), &ParseOptions::default().with_max_depth(100))
        });
        let shallow = scope.spawn(|| grammar.parse_guarded(&brackets(300)));
        assert_eq!(deep.join().unwrap(), Err(StackExhausted { limit: 100 }));
        assert_eq!(shallow.join().unwrap(), Ok(Outcome::success(600, 300)));
    });
}
