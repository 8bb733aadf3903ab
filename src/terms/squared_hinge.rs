//! Squared hinge-loss potential `f(x) = w·max(c·x − k, 0)²`.
//!
//! Purpose
//! -------
//! Solve the local ADMM proximal step
//!
//! ```text
//! x* = argmin_x  w·max(c·x − k, 0)² + (ρ/2)‖x − z + y/ρ‖²
//! ```
//!
//! exactly whenever possible, and through the injected
//! [`FallbackMinimizer`] otherwise.
//!
//! Key behaviors
//! -------------
//! - Let `v = z − y/ρ`. If `c·v ≤ k` (or `w = 0`) the hinge is inactive at
//!   the penalty's minimizer and `x* = v` exactly.
//! - Otherwise the hinge is active at the optimum and stationarity reads
//!   `(2w·ccᵀ + ρI) x = ρ·v + 2w·k·c`:
//!   - arity 1: a single division,
//!   - arity 2: Gaussian elimination of the 2×2 system,
//!   - arity ≥ 3: the fallback minimizer seeded at `v`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `w` is finite and `>= 0`; hard rules never reach this type.
//! - `2w·‖c‖²` and `2w·|k|·max|c|` are finite, so a weight that is finite
//!   but overflows the active system is rejected at construction.
//! - Every closed-form denominator is `>= ρ > 0`, so the closed forms cannot
//!   divide by zero.
//! - A failed fallback, or a step whose result is not finite, leaves `x`
//!   unchanged.
use crate::terms::{
    block::LocalBlock,
    errors::TermResult,
    fallback::{FallbackMinimizer, ProximalObjective},
    potential::PotentialOptimizer,
    validation::{validate_solution, validate_soft_weight, validate_squared_hinge_scale},
};
use ndarray::{Array1, ArrayView1, array};
use std::sync::Arc;

/// Squared hinge-loss term.
#[derive(Debug, Clone)]
pub struct SquaredHingeLoss {
    block: LocalBlock,
    fallback: Arc<dyn FallbackMinimizer>,
}

impl SquaredHingeLoss {
    /// Wrap a validated block.
    ///
    /// # Errors
    /// - [`TermError::InvalidWeight`](crate::terms::errors::TermError::InvalidWeight)
    ///   if the block weight is not finite, or so large that `2w·‖c‖²`
    ///   overflows.
    pub fn new(block: LocalBlock, fallback: Arc<dyn FallbackMinimizer>) -> TermResult<Self> {
        validate_soft_weight(block.weight())?;
        validate_squared_hinge_scale(block.weight(), block.coefficients(), block.constant())?;
        log::debug!(
            "squared hinge term {}: arity={}, weight={}",
            block.term_id(),
            block.arity(),
            block.weight()
        );
        Ok(Self { block, fallback })
    }

    /// Closed form for one variable: `x = (ρ·v + 2w·k·c) / (2w·c² + ρ)`.
    fn solve_arity_one(&self, v: &Array1<f64>) -> Array1<f64> {
        let (w, rho, k) = (self.block.weight(), self.block.step_size(), self.block.constant());
        let c0 = self.block.coefficients()[0];
        let two_w = 2.0 * w;
        array![(rho * v[0] + two_w * k * c0) / (two_w * c0 * c0 + rho)]
    }

    /// Closed form for two variables by eliminating `x0` from the second row
    /// of `(2w·ccᵀ + ρI) x = ρ·v + 2w·k·c`.
    fn solve_arity_two(&self, v: &Array1<f64>) -> Array1<f64> {
        let (w, rho, k) = (self.block.weight(), self.block.step_size(), self.block.constant());
        let c = self.block.coefficients();
        let (c0, c1) = (c[0], c[1]);
        let two_w = 2.0 * w;

        let a0 = two_w * c0 * c0 + rho;
        let b1 = two_w * c1 * c1 + rho;
        let a1b0 = two_w * c0 * c1;
        let r0 = rho * v[0] + two_w * k * c0;
        let r1 = rho * v[1] + two_w * k * c1;

        let factor = a1b0 / a0;
        let b1_reduced = b1 - factor * a1b0;
        let r1_reduced = r1 - factor * r0;

        let x1 = r1_reduced / b1_reduced;
        let x0 = (r0 - a1b0 * x1) / a0;
        array![x0, x1]
    }

    fn solve_with_fallback(&self, v: Array1<f64>) -> TermResult<Array1<f64>> {
        let objective = ProximalObjective::new(self);
        self.fallback.minimize(&objective, v).map_err(|err| {
            log::warn!("squared hinge term {}: fallback failed: {err}", self.block.term_id());
            err.into()
        })
    }

    /// Dispatch an active hinge on arity.
    fn solve_active(&self, v: Array1<f64>) -> TermResult<Array1<f64>> {
        let term_id = self.block.term_id();
        match self.block.arity() {
            1 => {
                log::trace!("squared hinge term {term_id}: active, arity-1 closed form");
                Ok(self.solve_arity_one(&v))
            }
            2 => {
                log::trace!("squared hinge term {term_id}: active, arity-2 closed form");
                Ok(self.solve_arity_two(&v))
            }
            arity => {
                log::trace!("squared hinge term {term_id}: active, arity-{arity} fallback");
                self.solve_with_fallback(v)
            }
        }
    }
}

impl PotentialOptimizer for SquaredHingeLoss {
    fn block(&self) -> &LocalBlock {
        &self.block
    }

    fn block_mut(&mut self) -> &mut LocalBlock {
        &mut self.block
    }

    fn evaluate(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        let margin = self.block.margin(point)?;
        Ok(self.block.weight() * margin.max(0.0).powi(2))
    }

    fn gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>> {
        let margin = self.block.margin(point)?;
        if margin > 0.0 {
            Ok(&self.block.coefficients() * (2.0 * self.block.weight() * margin))
        } else {
            Ok(Array1::zeros(self.block.arity()))
        }
    }

    fn solve_local(&mut self) -> TermResult<()> {
        let v = self.block.candidate();
        let term_id = self.block.term_id();
        let weight = self.block.weight();
        let x = if weight == 0.0 || self.block.coefficients().dot(&v) <= self.block.constant() {
            log::trace!("squared hinge term {term_id}: inactive, x = z - y/rho");
            v
        } else {
            self.solve_active(v)?
        };
        validate_solution(term_id, x.view())?;
        self.block.set_x(x);
        Ok(())
    }
}
