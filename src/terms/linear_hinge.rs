//! Linear hinge-loss potential `f(x) = w·max(c·x − k, 0)`.
//!
//! The proximal step has a closed form for every arity. With
//! `v = z − y/ρ`, the minimizer of `w·max(c·x − k, 0) + (ρ/2)‖x − v‖²` is
//! one of three regimes:
//!
//! 1. `c·v ≤ k`: the hinge is inactive and `x = v`.
//! 2. `x' = v − (w/ρ)c` still satisfies `c·x' ≥ k`: the hinge is active on
//!    its linear side and `x = x'`.
//! 3. otherwise the optimum sits on the kink: `x` is the projection of `v`
//!    onto the hyperplane `c·x = k`.
//!
//! The shift `(w/ρ)·c` must be finite; larger weights are rejected at
//! construction.
use crate::terms::{
    block::LocalBlock, errors::TermResult, potential::PotentialOptimizer,
    validation::{validate_linear_hinge_scale, validate_solution, validate_soft_weight},
};
use ndarray::{Array1, ArrayView1};

/// Linear hinge-loss term.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearHingeLoss {
    block: LocalBlock,
}

impl LinearHingeLoss {
    /// Wrap a validated block; the weight must be finite.
    ///
    /// # Errors
    /// - [`TermError::InvalidWeight`](crate::terms::errors::TermError::InvalidWeight)
    ///   if the weight is infinite or `(w/ρ)·max|c|` overflows.
    pub fn new(block: LocalBlock) -> TermResult<Self> {
        validate_soft_weight(block.weight())?;
        validate_linear_hinge_scale(block.weight(), block.coefficients(), block.step_size())?;
        log::debug!(
            "linear hinge term {}: arity={}, weight={}",
            block.term_id(),
            block.arity(),
            block.weight()
        );
        Ok(Self { block })
    }
}

impl PotentialOptimizer for LinearHingeLoss {
    fn block(&self) -> &LocalBlock {
        &self.block
    }

    fn block_mut(&mut self) -> &mut LocalBlock {
        &mut self.block
    }

    fn evaluate(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        let margin = self.block.margin(point)?;
        Ok(self.block.weight() * margin.max(0.0))
    }

    /// `w·c` on the active side, zero otherwise (the zero subgradient at the
    /// kink).
    fn gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>> {
        let margin = self.block.margin(point)?;
        if margin > 0.0 {
            Ok(&self.block.coefficients() * self.block.weight())
        } else {
            Ok(Array1::zeros(self.block.arity()))
        }
    }

    fn solve_local(&mut self) -> TermResult<()> {
        let term_id = self.block.term_id();
        let v = self.block.candidate();
        let c = self.block.coefficients();
        let k = self.block.constant();
        let c_dot_v = c.dot(&v);
        let x = if self.block.weight() == 0.0 || c_dot_v <= k {
            log::trace!("linear hinge term {term_id}: inactive");
            v
        } else {
            let step = self.block.weight() / self.block.step_size();
            let shifted = &v - &(&c * step);
            if c.dot(&shifted) >= k {
                log::trace!("linear hinge term {term_id}: active, linear side");
                shifted
            } else {
                log::trace!("linear hinge term {term_id}: active, projected onto the kink");
                // c·v > k implies c ≠ 0.
                let scale = (c_dot_v - k) / c.dot(&c);
                &v - &(&c * scale)
            }
        };
        validate_solution(term_id, x.view())?;
        self.block.set_x(x);
        Ok(())
    }
}
