//! Exact median over a retained value list.

/// Median of a non-empty sequence.
///
/// Sorts a copy ascending; odd lengths take the middle element, even
/// lengths average the two values adjacent to the midpoint. The result
/// does not depend on the presentation order of `values`.
pub fn median(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty(), "median of empty sequence");

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
