use super::*;
use crate::outcome::Expected;
use crate::primitive::{literal, literals, pattern, pattern_skip, succeed};
use pretty_assertions::assert_eq;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn integer() -> Parser<i64> {
    pattern(r"\d+")
        .unwrap()
        .try_map(|digits| digits.parse::<i64>().map_err(|_| Expected::label("a small integer")))
}

#[test]
fn test_repeat_is_total() {
    let a = literal("a").repeat();
    assert_eq!(a.parse(""), Outcome::success(0, Vec::new()));
    assert_eq!(a.parse("aaa"), Outcome::success(3, strings(&["a", "a", "a"])));
    assert_eq!(a.parse("aab"), Outcome::success(2, strings(&["a", "a"])));
}

#[test]
fn test_repeat_propagates_committed_failure() {
    let ab = literal("a").then(literal("b")).repeat();
    assert_eq!(ab.parse("abab").position(), 4);
    assert_eq!(ab.parse("aba"), Outcome::failure(3, "\"b\""));
}

#[test]
fn test_repeat_stops_on_empty_match() {
    let blanks = pattern_skip(" *").unwrap().repeat();
    assert_eq!(blanks.parse("   x"), Outcome::success(3, vec![()]));

    let nothing = succeed::<u8, str>(1).repeat();
    assert_eq!(nothing.parse("abc"), Outcome::success(0, Vec::new()));
}

#[test]
fn test_repeat_exact() {
    let three = literal("a").repeat_exact(3);
    assert_eq!(three.parse("aaaa"), Outcome::success(3, strings(&["a", "a", "a"])));
    assert_eq!(three.parse("aa"), Outcome::failure(2, "\"a\""));
    assert_eq!(literal("a").repeat_exact(0).parse("b"), Outcome::success(0, Vec::new()));
}

#[test]
fn test_join() {
    let list = integer().join(literal(","));
    assert_eq!(list.parse(""), Outcome::success(0, Vec::new()));
    assert_eq!(list.parse("1"), Outcome::success(1, vec![1]));
    assert_eq!(list.parse("1,22,333"), Outcome::success(8, vec![1, 22, 333]));
    assert_eq!(list.parse("1,2;3"), Outcome::success(3, vec![1, 2]));
}

#[test]
fn test_join_rejects_dangling_delimiter() {
    let list = integer().join(literal(","));
    assert_eq!(list.parse("1,2,"), Outcome::failure(4, r"/\d+/"));
}

#[test]
fn test_join_propagates_committed_failures() {
    let pair = literal("(").skip_then(integer()).then_skip(literal(")"));
    let list = pair.join(literal(", "));
    assert_eq!(list.parse("(1), (2"), Outcome::failure(7, "\")\""));
    assert_eq!(list.parse("(x"), Outcome::failure(1, r"/\d+/"));

    let arrow = integer().join(literal("-").then(literal(">")));
    assert_eq!(arrow.parse("1-2"), Outcome::failure(2, "\">\""));
}

#[test]
fn test_chain_left() {
    let op = literals(["+", "-"]).unwrap().map(|op| -> fn(i64, i64) -> i64 {
        if op == "+" {
            |l, r| l + r
        } else {
            |l, r| l - r
        }
    });
    let sum = integer().chain_left(op);
    assert_eq!(sum.parse("1+2-3"), Outcome::success(5, 0));
    assert_eq!(sum.parse("10-2-3"), Outcome::success(6, 5));
    assert_eq!(sum.parse("7"), Outcome::success(1, 7));
    assert_eq!(sum.parse("7+"), Outcome::failure(2, r"/\d+/"));
}

#[test]
fn test_chain_right() {
    let pow = literal("**").map(|_| |l: i64, r: i64| l.pow(u32::try_from(r).unwrap_or(0)));
    let power = integer().chain_right(pow);
    assert_eq!(power.parse("2**3**2"), Outcome::success(7, 512));
    assert_eq!(power.parse("2**3"), Outcome::success(4, 8));
    assert_eq!(power.parse("5"), Outcome::success(1, 5));
}

#[test]
fn test_chain_right_associates_right() {
    let minus = literal("-").map(|_| |l: i64, r: i64| l - r);
    let right = integer().chain_right(minus);
    // 10-(4-(3-1)) = 8
    assert_eq!(right.parse("10-4-3-1"), Outcome::success(8, 8));
}

#[test]
fn test_fold_right_shapes() {
    let tail: Vec<(fn(String, String) -> String, String)> = vec![
        (|l, r| format!("({l} {r})"), "b".to_owned()),
        (|l, r| format!("({l} {r})"), "c".to_owned()),
    ];
    assert_eq!(fold_right("a".to_owned(), tail), "(a (b c))");
    assert_eq!(fold_right::<_, fn(i32, i32) -> i32>(1, Vec::new()), 1);
}
