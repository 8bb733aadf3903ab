//! High-level entry point for minimizing a [`ConvexObjective`].
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the objective in an `ArgMinAdapter`, and delegates the run to
//! `run_lbfgs`.
use crate::optimization::{
    convex_minimizer::{
        MinimizeOutcome, Point,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{ConvexObjective, LineSearcher, MinimizerOptions},
    },
    errors::OptResult,
};

/// Minimize a convex objective `f(x)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the starting point via `f.check(&x0)`.
/// - Builds an L-BFGS solver with **Hager–Zhang** or **More–Thuente** line
///   search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor (initial point,
///   max iters, optional observers) and returns a [`MinimizeOutcome`].
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Example
/// ```
/// use admm_terms::optimization::convex_minimizer::{
///     minimize, ConvexObjective, MinimizerOptions, Point, Cost,
/// };
/// use admm_terms::optimization::errors::OptResult;
/// use ndarray::array;
///
/// struct Bowl;
/// impl ConvexObjective for Bowl {
///     fn value(&self, x: &Point) -> OptResult<Cost> {
///         Ok(x.iter().map(|v| (v - 2.0).powi(2)).sum())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.0, 5.0], &MinimizerOptions::default())?;
/// assert!((out.x_hat[0] - 2.0).abs() < 1e-4);
/// # Ok::<(), admm_terms::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: ConvexObjective + ?Sized>(
    f: &F, x0: Point, opts: &MinimizerOptions,
) -> OptResult<MinimizeOutcome> {
    f.check(&x0)?;
    let problem = ArgMinAdapter::new(f);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        convex_minimizer::{Cost, Grad, Tolerances},
        errors::OptError,
    };
    use ndarray::{Array1, array};

    /// Separable quadratic `Σ wᵢ (xᵢ − tᵢ)²` with an analytic gradient.
    struct WeightedBowl {
        weights: Array1<f64>,
        target: Array1<f64>,
    }

    impl ConvexObjective for WeightedBowl {
        fn value(&self, x: &Point) -> OptResult<Cost> {
            let d = x - &self.target;
            Ok((&self.weights * &d * &d).sum())
        }

        fn grad(&self, x: &Point) -> OptResult<Grad> {
            Ok(2.0 * &self.weights * &(x - &self.target))
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end minimization with both line searches.
    // - Rejection of invalid starting points before any solver runs.
    //
    // They intentionally DO NOT cover:
    // - Proximal objectives (tested in `terms::fallback`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that both line searches reach the minimizer of a well-scaled
    // separable quadratic.
    //
    // Given
    // -----
    // - Weights `[1, 4, 0.5]`, target `[1, -2, 3]`, start at the origin.
    //
    // Expect
    // ------
    // - `x_hat` within 1e-5 of the target and `converged == true`.
    fn minimize_recovers_quadratic_minimizer_with_both_line_searches() {
        // Arrange
        let objective =
            WeightedBowl { weights: array![1.0, 4.0, 0.5], target: array![1.0, -2.0, 3.0] };
        for searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let tols = Tolerances::new(Some(1e-8), None, Some(200)).expect("valid tolerances");
            let opts = MinimizerOptions::new(tols, searcher, false, None).expect("valid options");

            // Act
            let out = minimize(&objective, Array1::zeros(3), &opts).expect("minimize should run");

            // Assert
            for (got, want) in out.x_hat.iter().zip(objective.target.iter()) {
                assert!((got - want).abs() < 1e-5, "{searcher:?}: got {got}, want {want}");
            }
            assert!(out.converged, "{searcher:?} should report a terminating status");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite starting point is rejected by the default `check`.
    //
    // Given
    // -----
    // - Starting point `[0, NaN]`.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidSeed { index: 1, .. })`.
    fn minimize_rejects_non_finite_seed() {
        // Arrange
        let objective = WeightedBowl { weights: array![1.0, 1.0], target: array![0.0, 0.0] };

        // Act
        let result = minimize(&objective, array![0.0, f64::NAN], &MinimizerOptions::default());

        // Assert
        assert!(matches!(result, Err(OptError::InvalidSeed { index: 1, .. })));
    }
}
