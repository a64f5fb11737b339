//! Least squares.
//!
//! Growth rates come from a straight-line fit of `ln(value)` against a 0-based
//! index. We build the two-column design matrix `[1, x]` and solve it with the
//! same SVD least-squares routine used for general problems, so a degenerate
//! design (all `x` equal) fails cleanly instead of dividing by zero.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// `y ≈ intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

/// Ordinary least squares fit of a line through `(x_i, y_i)`.
///
/// `None` for fewer than two points, mismatched lengths, non-finite input,
/// or when every `x` is the same.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }
    if !x.iter().chain(y).all(|v| v.is_finite()) {
        return None;
    }

    let x0 = x[0];
    if x.iter().all(|&v| (v - x0).abs() < f64::EPSILON) {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { 1.0 } else { x[r] });
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)?;

    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
    })
}

/// Fit against the index `0..y.len()`.
pub fn fit_line_indexed(y: &[f64]) -> Option<LineFit> {
    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    fit_line(&x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_matches_closed_form() {
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        let fit = fit_line_indexed(&y).unwrap();

        // slope = Σ(x-x̄)(y-ȳ) / Σ(x-x̄)², with x̄ = 2, ȳ = 3.
        let slope = (-2.0 * -2.0 + -1.0 * 0.0 + 0.0 * -1.0 + 1.0 * 2.0 + 2.0 * 1.0) / 10.0;
        assert!((fit.slope - slope).abs() < 1e-12, "{fit:?}");
        assert!((fit.intercept - (3.0 - slope * 2.0)).abs() < 1e-12, "{fit:?}");
    }

    #[test]
    fn two_points_give_exact_line() {
        let fit = fit_line(&[0.0, 1.0], &[4.0, 6.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 4.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(fit_line(&[1.0], &[1.0]).is_none());
        assert!(fit_line(&[1.0, 1.0], &[1.0, 2.0]).is_none());
        assert!(fit_line(&[0.0, 1.0], &[1.0, f64::NAN]).is_none());
        assert!(fit_line(&[0.0, 1.0, 2.0], &[1.0, 2.0]).is_none());
    }
}
