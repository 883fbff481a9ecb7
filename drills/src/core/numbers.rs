//! In-place list arithmetic for the utility drill.

/// Double every element of `values` in place.
///
/// The caller keeps ownership; changes are visible through its binding once
/// the borrow ends. Overflow wraps.
pub fn double_values(values: &mut [i64]) {
    for value in values.iter_mut() {
        *value = value.wrapping_mul(2);
    }
}

/// Format a list as `[1 2 3]`.
pub fn format_list(values: &[i64]) -> String {
    let parts: Vec<String> = values.iter().map(i64::to_string).collect();
    format!("[{}]", parts.join(" "))
}
