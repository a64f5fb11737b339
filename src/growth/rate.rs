//! Trend growth rate: log-linear OLS.
//!
//! For values `v_0 .. v_{n-1}` (all > 0) we regress `ln(v_i)` on `i` and turn
//! the slope into a compound percentage:
//!
//! ```text
//! rate_pct = (exp(slope) - 1) * 100
//! ```

use crate::math::fit_line_indexed;

/// Slope to percentage compound rate.
pub fn rate_from_slope(slope: f64) -> f64 {
    slope.exp_m1() * 100.0
}

/// Trend growth rate of `values` in percent.
///
/// `None` for fewer than two values, any non-positive value, or a failed fit.
pub fn trend_growth_rate(values: &[f64]) -> Option<f64> {
    if values.len() < 2 || values.iter().any(|&v| !(v > 0.0 && v.is_finite())) {
        return None;
    }
    let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
    let fit = fit_line_indexed(&logs)?;
    let rate = rate_from_slope(fit.slope);
    rate.is_finite().then_some(rate)
}
