//! Centralized limits for the type-lowering workspace.
//!
//! Lowering is total: every limit here turns a pathological input into the
//! Error Type sentinel (or an unexpanded type) instead of a stack overflow.
//!
//! Recursion limits for front-end traversals that need cycle detection as
//! well (alias expansion, captured-type approximation) live in
//! `tylo_front::recursion::RecursionProfile`; the constants below back those
//! profiles so the numbers are defined once.

/// Maximum number of captured types entered on one path of a top-level
/// lowering call.
///
/// Type arguments and the other wrappers do not count: without captured
/// supertypes the type graph is acyclic. Reaching the limit means the input
/// keeps re-entering a captured type whose approximation was declined.
///
/// ```text
/// // Captured type C with bound Comparable<C>, lowered with an approximator
/// // that never answers:
/// lower(C) -> lower(Comparable<C>) -> lower(C) -> lower(Comparable<C>) -> ...
/// ```
pub const MAX_TYPE_LOWERING_DEPTH: u32 = 256;

/// Maximum number of type-alias hops followed while expanding one type or
/// resolving an alias to its underlying classifier.
///
/// ```text
/// typealias A = B
/// typealias B = C
/// ...
/// ```
pub const MAX_ALIAS_EXPANSION_DEPTH: u32 = 64;

/// Maximum depth of captured-type approximation.
pub const MAX_APPROXIMATION_DEPTH: u32 = 64;

/// Total work budget for one recursion guard.
pub const MAX_GUARD_ITERATIONS: u32 = 100_000;
