use super::*;
use pretty_assertions::assert_eq;
use weft_core::END_OF_INPUT;

fn eval(input: &str) -> Option<f64> {
    Arithmetic::new().ok()?.evaluate(input).ok()
}

#[test]
fn test_single_integers() {
    assert_eq!(eval("1"), Some(1.0));
    assert_eq!(eval("007"), Some(7.0));
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2*3"), Some(6.0));
    assert_eq!(eval("4+5*6"), Some(34.0));
    assert_eq!(eval("7*8+9"), Some(65.0));
    assert_eq!(eval("2+3*4"), Some(14.0));
    assert_eq!(eval("((10)+(9*8-7*6)*(5))-4-3-(2-1)"), Some(152.0));
}

#[test]
fn test_division_is_floating_point() {
    assert_eq!(eval("999*999999*99999/9999"), Some(9_990_889_199.019_802));
    assert_eq!(eval("1/0"), Some(f64::INFINITY));
    assert_eq!(eval("7/2"), Some(3.5));
}

#[test]
fn test_associativity() {
    assert_eq!(eval("1+2-3"), Some(0.0));
    assert_eq!(eval("8/4/2"), Some(1.0));
    assert_eq!(eval("2**3**2"), Some(512.0));
}

#[test]
fn test_prefix_operators() {
    assert_eq!(eval("-3"), Some(-3.0));
    assert_eq!(eval("--3"), Some(3.0));
    assert_eq!(eval("1--2"), Some(3.0));
    assert_eq!(eval("~5"), Some(-6.0));
    assert_eq!(eval("~-1"), Some(0.0));
    assert_eq!(eval("-~0"), Some(1.0));
    // Prefix operators bind tighter than `**`.
    assert_eq!(eval("-2**2"), Some(4.0));
    assert_eq!(eval("2**-1"), Some(0.5));
}

#[test]
fn test_empty_input() {
    let arithmetic = Arithmetic::new().unwrap();
    assert_eq!(
        arithmetic.evaluate(""),
        Outcome::failure(
            0,
            Expected::Many(vec![Expected::label("an integer"), Expected::label("\"(\"")])
        )
    );
}

#[test]
fn test_only_ascii_digits() {
    let arithmetic = Arithmetic::new().unwrap();
    assert_eq!(
        arithmetic.evaluate("\u{0663}"),
        Outcome::failure(
            0,
            Expected::Many(vec![Expected::label("an integer"), Expected::label("\"(\"")])
        )
    );
    assert_eq!(arithmetic.evaluate("1\u{0663}"), Outcome::failure(1, END_OF_INPUT));
}

#[test]
fn test_rejects_whitespace_and_trailing_input() {
    let arithmetic = Arithmetic::new().unwrap();
    assert_eq!(arithmetic.evaluate("1 + 2"), Outcome::failure(1, END_OF_INPUT));
    assert_eq!(arithmetic.evaluate("(1))"), Outcome::failure(3, END_OF_INPUT));
}

#[test]
fn test_committed_failures() {
    let arithmetic = Arithmetic::new().unwrap();
    assert_eq!(arithmetic.evaluate("(1+2").position(), 4);
    assert_eq!(arithmetic.evaluate("1*").position(), 2);
    assert!(arithmetic.evaluate("1*").is_failure());
}

#[test]
fn test_to_i32_wrapping() {
    assert_eq!(to_i32_wrapping(5.9), 5);
    assert_eq!(to_i32_wrapping(-5.9), -5);
    assert_eq!(to_i32_wrapping(4_294_967_297.0), 1);
    assert_eq!(to_i32_wrapping(2_147_483_648.0), i32::MIN);
    assert_eq!(to_i32_wrapping(f64::NAN), 0);
    assert_eq!(to_i32_wrapping(f64::NEG_INFINITY), 0);
}
