use super::*;

#[test]
fn test_shallow_recursion() {
    fn factorial(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
    }

    assert_eq!(factorial(10), 3_628_800);
}

#[test]
fn test_deep_recursion() {
    // This would overflow without stack growth
    fn deep_recurse(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
    }

    assert_eq!(deep_recurse(100_000), 100_000);
}

#[test]
fn test_recurse_tracks_depth() {
    assert_eq!(current_depth(), 0);
    let inner = recurse(|| recurse(current_depth));
    assert_eq!(inner, 2);
    assert_eq!(current_depth(), 0);
}

#[test]
fn test_recurse_within_budget() {
    fn countdown(n: usize) -> usize {
        recurse(|| if n == 0 { 0 } else { countdown(n - 1) + 1 })
    }

    let result = catch_exhaustion(|| with_depth_limit(50_000, || countdown(20_000)));
    assert_eq!(result, Ok(20_000));
}

#[test]
fn test_budget_exhaustion_is_typed() {
    fn forever(n: usize) -> usize {
        recurse(|| forever(n + 1))
    }

    let result = catch_exhaustion(|| with_depth_limit(64, || forever(0)));
    assert_eq!(result, Err(StackExhausted { limit: 64 }));
    // Guards unwind with the panic.
    assert_eq!(current_depth(), 0);
    assert_eq!(depth_limit(), DEFAULT_DEPTH_LIMIT);
}

#[test]
fn test_limit_restored_after_scope() {
    let seen = with_depth_limit(7, || with_depth_limit(3, depth_limit));
    assert_eq!(seen, 3);
    assert_eq!(depth_limit(), DEFAULT_DEPTH_LIMIT);
}

#[test]
fn test_other_panics_pass_through() {
    let result = panic::catch_unwind(|| catch_exhaustion(|| panic!("unrelated")));
    assert!(result.is_err());
}

#[test]
fn test_exhaustion_message() {
    let err = StackExhausted { limit: 12 };
    assert_eq!(err.to_string(), "recursion depth limit of 12 exceeded");
}

#[test]
fn test_silenced_hook_keeps_recovery() {
    fn forever(n: usize) -> usize {
        recurse(|| forever(n + 1))
    }

    silence_exhaustion_reports();
    silence_exhaustion_reports();
    let result = catch_exhaustion(|| with_depth_limit(16, || forever(0)));
    assert_eq!(result, Err(StackExhausted { limit: 16 }));
    let other = panic::catch_unwind(|| catch_exhaustion(|| panic!("still reported")));
    assert!(other.is_err());
}
