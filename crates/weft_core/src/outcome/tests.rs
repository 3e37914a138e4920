use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_success_accessors() {
    let outcome = Outcome::success(3, "foo");
    assert!(outcome.is_success());
    assert_eq!(outcome.position(), 3);
    assert_eq!(outcome.value(), Some(&"foo"));
    assert_eq!(outcome.expected(), None);
    assert!(!outcome.failed_without_progress(0));
    assert_eq!(outcome.unwrap(), "foo");
}

#[test]
fn test_failure_accessors() {
    let outcome: Outcome<()> = Outcome::failure(2, "\"b\"");
    assert!(outcome.is_failure());
    assert_eq!(outcome.position(), 2);
    assert_eq!(outcome.expected(), Some(&Expected::label("\"b\"")));
    assert!(outcome.failed_without_progress(2));
    assert!(!outcome.failed_without_progress(1));
}

#[test]
fn test_map_keeps_position() {
    let outcome = Outcome::success(4, 20).map(|n| n + 1);
    assert_eq!(outcome, Outcome::success(4, 21));

    let failure: Outcome<i32> = Outcome::failure(1, "x");
    assert_eq!(failure.map(|n| n + 1), Outcome::failure(1, "x"));
}

#[test]
fn test_into_result() {
    assert_eq!(Outcome::success(1, 'a').into_result(), Ok('a'));

    let failure: Result<char, ParseFailure> = Outcome::failure(5, "end of input").into();
    assert_eq!(
        failure,
        Err(ParseFailure {
            position: 5,
            expected: Expected::label("end of input"),
        })
    );
}

#[test]
#[should_panic(expected = "expected \"foo\"")]
fn test_unwrap_failure_panics() {
    let outcome: Outcome<()> = Outcome::failure(0, "\"foo\"");
    outcome.unwrap();
}

#[test]
fn test_labels_flatten_in_order() {
    let expected = Expected::many([
        Expected::label("a"),
        Expected::many([Expected::label("b"), Expected::label("a")]),
        Expected::label("c"),
    ]);
    assert_eq!(expected.labels(), vec!["a", "b", "a", "c"]);
}

#[test]
fn test_display() {
    assert_eq!(Expected::label("an integer").to_string(), "an integer");
    assert_eq!(Expected::many([]).to_string(), "nothing");
    assert_eq!(
        Expected::from(vec![Expected::label("\"(\""), Expected::label("an integer")]).to_string(),
        "\"(\" or an integer"
    );
    assert_eq!(
        Expected::many(["a", "b", "c"].map(Expected::label)).to_string(),
        "a, b, or c"
    );
}
