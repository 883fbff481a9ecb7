//! Small arithmetic helpers shared by the drills binary.

/// Sum of `a` and `b`.
///
/// Overflow wraps in two's complement, the same way a native machine integer
/// would, instead of panicking in debug builds.
pub fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}
