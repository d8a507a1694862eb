use super::*;

#[test]
fn test_enter_and_leave() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 100);

    assert_eq!(guard.enter(1), RecursionResult::Entered);
    assert!(guard.is_visiting(&1));
    assert_eq!(guard.depth(), 1);

    guard.leave(1);
    assert!(!guard.is_visiting(&1));
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_cycle_detection() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 100);

    assert!(guard.enter(1).is_entered());
    let result = guard.enter(1);
    assert!(result.is_cycle());
    assert!(!result.is_exceeded());
    assert!(!guard.is_exceeded());

    guard.leave(1);
}

#[test]
fn test_depth_limit() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(2, 100);

    assert!(guard.enter(1).is_entered());
    assert!(guard.enter(2).is_entered());
    assert_eq!(guard.enter(3), RecursionResult::DepthExceeded);
    assert!(guard.is_exceeded());

    guard.leave(2);
    guard.leave(1);
}

#[test]
fn test_iteration_limit() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 3);

    for key in 0..3 {
        assert!(guard.enter(key).is_entered());
        guard.leave(key);
    }
    assert_eq!(guard.enter(99), RecursionResult::IterationExceeded);
    assert!(guard.is_exceeded());
}

#[test]
fn test_profiles() {
    assert_eq!(
        RecursionProfile::AliasExpansion.max_depth(),
        tylo_common::limits::MAX_ALIAS_EXPANSION_DEPTH
    );
    assert_eq!(
        RecursionProfile::TypeApproximation.max_depth(),
        tylo_common::limits::MAX_APPROXIMATION_DEPTH
    );

    let custom = RecursionProfile::Custom {
        max_depth: 3,
        max_iterations: 7,
    };
    assert_eq!(custom.max_depth(), 3);
    assert_eq!(custom.max_iterations(), 7);

    let mut guard: RecursionGuard<u32> = RecursionGuard::with_profile(custom);
    assert!(guard.enter(0).is_entered());
    guard.leave(0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "RecursionGuard dropped with 1 active entries")]
fn test_leaked_enter_panics_on_drop() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 100);
    let _ = guard.enter(5);
}
