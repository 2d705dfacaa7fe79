//! Rounding and "near" comparisons.

/// Rounds `value` to `decimals` decimal places, ties to even.
pub fn round(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round_ties_even() / multiplier
}

/// True when both values are equal after rounding to `decimals`.
pub fn is_near(a: f64, b: f64, decimals: u32) -> bool {
    round(a, decimals) == round(b, decimals)
}
