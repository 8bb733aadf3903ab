//! Fallback minimization for proximal steps without a closed form.
//!
//! Purpose
//! -------
//! Define the capability a potential uses when it cannot solve its proximal
//! step analytically (squared hinge with arity ≥ 3), and provide the default
//! implementation backed by the crate's argmin L-BFGS layer.
//!
//! Key behaviors
//! -------------
//! - [`FallbackMinimizer`] is object safe and `Send + Sync`, so one instance
//!   can be shared as `Arc<dyn FallbackMinimizer>` by every term of a run.
//! - [`ProximalObjective`] exposes the augmented objective
//!   `g(x) = f(x) + (ρ/2)‖x − z + y/ρ‖²` of any [`PotentialOptimizer`] as a
//!   [`ConvexObjective`] with an analytic gradient.
//! - [`LbfgsFallback`] runs [`minimize`] and turns an iteration-cap stop into
//!   [`OptError::NotConverged`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The seed handed to `minimize` has the arity of the block; the objective
//!   reports a length mismatch as [`OptError::ObjectiveFailed`].
use crate::{
    optimization::{
        convex_minimizer::{ConvexObjective, Cost, Grad, MinimizerOptions, Point, minimize},
        errors::{OptError, OptResult},
    },
    terms::{errors::TermError, potential::PotentialOptimizer},
};
use std::fmt::Debug;

/// Generic convex minimizer used by potentials without a closed-form step.
pub trait FallbackMinimizer: Send + Sync + Debug {
    /// Minimize `objective` starting from `seed` and return the minimizer.
    fn minimize(&self, objective: &dyn ConvexObjective, seed: Point) -> OptResult<Point>;
}

/// Default fallback: L-BFGS through `optimization::convex_minimizer`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LbfgsFallback {
    opts: MinimizerOptions,
}

impl LbfgsFallback {
    pub fn new(opts: MinimizerOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &MinimizerOptions {
        &self.opts
    }
}

impl FallbackMinimizer for LbfgsFallback {
    fn minimize(&self, objective: &dyn ConvexObjective, seed: Point) -> OptResult<Point> {
        let outcome = minimize(objective, seed, &self.opts)?;
        if outcome.max_iters_reached {
            log::warn!(
                "L-BFGS fallback hit the iteration cap after {} iterations (grad norm {:?})",
                outcome.iterations,
                outcome.grad_norm
            );
            return Err(OptError::NotConverged {
                iterations: outcome.iterations,
                grad_norm: outcome.grad_norm,
            });
        }
        log::debug!(
            "L-BFGS fallback finished: status={}, iterations={}, value={:.3e}",
            outcome.status,
            outcome.iterations,
            outcome.value
        );
        Ok(outcome.x_hat)
    }
}

/// Augmented proximal objective of a potential, evaluated against the
/// potential's current `z`, `y` and ρ.
#[derive(Debug)]
pub struct ProximalObjective<'a, P: PotentialOptimizer + ?Sized> {
    potential: &'a P,
}

impl<'a, P: PotentialOptimizer + ?Sized> ProximalObjective<'a, P> {
    pub fn new(potential: &'a P) -> Self {
        Self { potential }
    }
}

fn objective_failed(err: TermError) -> OptError {
    OptError::ObjectiveFailed { text: err.to_string() }
}

impl<P: PotentialOptimizer + ?Sized> ConvexObjective for ProximalObjective<'_, P> {
    fn value(&self, x: &Point) -> OptResult<Cost> {
        self.potential.augmented_value(x.view()).map_err(objective_failed)
    }

    fn grad(&self, x: &Point) -> OptResult<Grad> {
        let view = x.view();
        let potential_grad = self.potential.gradient(view).map_err(objective_failed)?;
        let penalty_grad = self.potential.block().penalty_gradient(view).map_err(objective_failed)?;
        Ok(potential_grad + penalty_grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::convex_minimizer::{LineSearcher, Tolerances};
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `LbfgsFallback` on a plain convex objective.
    // - Mapping of an iteration-cap stop to `OptError::NotConverged`.
    //
    // They intentionally DO NOT cover:
    // - `ProximalObjective` on real potentials (see `squared_hinge`).
    // -------------------------------------------------------------------------

    /// Ill-conditioned separable quadratic `Σ wᵢ (xᵢ − 1)²`.
    struct Stretched {
        weights: Array1<f64>,
    }

    impl ConvexObjective for Stretched {
        fn value(&self, x: &Point) -> OptResult<Cost> {
            Ok(x.iter().zip(self.weights.iter()).map(|(xi, wi)| wi * (xi - 1.0).powi(2)).sum())
        }

        fn grad(&self, x: &Point) -> OptResult<Grad> {
            Ok(x.iter().zip(self.weights.iter()).map(|(xi, wi)| 2.0 * wi * (xi - 1.0)).collect())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the default fallback reaches the minimizer through a trait
    // object.
    //
    // Given
    // -----
    // - `Σ wᵢ (xᵢ − 1)²` with weights `[1, 10, 100]`, seed at the origin.
    //
    // Expect
    // ------
    // - Returned point within 1e-6 of `[1, 1, 1]`.
    fn lbfgs_fallback_minimizes_dyn_objective() {
        // Arrange
        let objective = Stretched { weights: array![1.0, 10.0, 100.0] };
        let fallback: &dyn FallbackMinimizer = &LbfgsFallback::default();

        // Act
        let x = fallback.minimize(&objective, Array1::zeros(3)).expect("fallback should succeed");

        // Assert
        for xi in x.iter() {
            assert!((xi - 1.0).abs() < 1e-6, "x = {x:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a run stopped by the iteration cap is reported as
    // non-convergence rather than returned as a solution.
    //
    // Given
    // -----
    // - The same ill-conditioned quadratic with `max_iter = 1` and no
    //   gradient/cost tolerances.
    //
    // Expect
    // ------
    // - `Err(OptError::NotConverged { iterations: 1, .. })`.
    fn lbfgs_fallback_reports_iteration_cap() {
        // Arrange
        let objective = Stretched { weights: array![1.0, 10.0, 100.0] };
        let tols = Tolerances::new(None, None, Some(1)).expect("valid tolerances");
        let opts = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("valid options");
        let fallback = LbfgsFallback::new(opts);

        // Act
        let result = fallback.minimize(&objective, Array1::zeros(3));

        // Assert
        assert!(matches!(result, Err(OptError::NotConverged { iterations: 1, .. })));
    }
}
