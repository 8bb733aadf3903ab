//! Hard linear constraints — the path hard rules take instead of a hinge.
//!
//! Purpose
//! -------
//! A hard rule carries an effectively infinite weight, so a hinge penalty
//! would be ill-defined. It is represented instead as the indicator of a
//! linear feasible set, `c·x ≤ k` or `c·x = k`, whose proximal step is the
//! Euclidean projection of `v = z − y/ρ` onto that set.
//!
//! Key behaviors
//! -------------
//! - `evaluate` is `0` on the feasible set (within [`CONSTRAINT_TOL`]) and
//!   `+∞` outside it; `gradient` is always zero.
//! - `solve_local` never fails: infeasible zero-coefficient constraints are
//!   rejected by [`LinearConstraint::new`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The block weight is ignored; grounding stores `+∞` there for hard rules.
use crate::terms::{
    block::LocalBlock,
    errors::{TermError, TermResult},
    potential::PotentialOptimizer,
};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Feasibility tolerance applied to `c·x − k` by `evaluate`.
pub const CONSTRAINT_TOL: f64 = 1e-9;

/// Comparator of a hard linear rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// `c·x ≤ k`
    #[default]
    Inequality,
    /// `c·x = k`
    Equality,
}

/// Hard linear constraint term.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    block: LocalBlock,
    kind: ConstraintKind,
}

impl LinearConstraint {
    /// Wrap a validated block as a hard constraint.
    ///
    /// # Errors
    /// - [`TermError::InfeasibleConstraint`] when every coefficient is zero
    ///   and `0 ≤ k` (inequality) or `0 = k` (equality) does not hold.
    pub fn new(block: LocalBlock, kind: ConstraintKind) -> TermResult<Self> {
        let constant = block.constant();
        let degenerate = block.coefficients().iter().all(|&c| c == 0.0);
        if degenerate && !Self::satisfied(kind, -constant) {
            return Err(TermError::InfeasibleConstraint { constant });
        }
        log::debug!(
            "hard constraint term {}: arity={}, kind={kind:?}",
            block.term_id(),
            block.arity()
        );
        Ok(Self { block, kind })
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    fn satisfied(kind: ConstraintKind, margin: f64) -> bool {
        match kind {
            ConstraintKind::Inequality => margin <= CONSTRAINT_TOL,
            ConstraintKind::Equality => margin.abs() <= CONSTRAINT_TOL,
        }
    }
}

impl PotentialOptimizer for LinearConstraint {
    fn block(&self) -> &LocalBlock {
        &self.block
    }

    fn block_mut(&mut self) -> &mut LocalBlock {
        &mut self.block
    }

    fn evaluate(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        let margin = self.block.margin(point)?;
        Ok(if Self::satisfied(self.kind, margin) { 0.0 } else { f64::INFINITY })
    }

    fn gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>> {
        self.block.check_point(point)?;
        Ok(Array1::zeros(self.block.arity()))
    }

    fn solve_local(&mut self) -> TermResult<()> {
        let v = self.block.candidate();
        let c = self.block.coefficients();
        let norm_sq = c.dot(&c);
        let margin = c.dot(&v) - self.block.constant();
        let inside = match self.kind {
            ConstraintKind::Inequality => margin <= 0.0,
            ConstraintKind::Equality => margin == 0.0,
        };
        if inside || norm_sq == 0.0 {
            log::trace!("hard constraint term {}: candidate feasible", self.block.term_id());
            self.block.set_x(v);
            return Ok(());
        }
        log::trace!("hard constraint term {}: projecting candidate", self.block.term_id());
        let x = &v - &(&c * (margin / norm_sq));
        self.block.set_x(x);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Projection onto inequality and equality sets.
    // - Indicator-style `evaluate` and the zero-coefficient feasibility check.
    // -------------------------------------------------------------------------

    fn block(coefficients: Array1<f64>, constant: f64) -> LocalBlock {
        let n = coefficients.len();
        let z_indices = (0..n).collect();
        let z = Array1::zeros(n);
        LocalBlock::new(11, coefficients, constant, f64::INFINITY, 1.0, z_indices, z)
            .expect("valid block")
    }

    #[test]
    // Purpose
    // -------
    // Verify projection keeps feasible candidates and projects violators onto
    // the boundary.
    //
    // Given
    // -----
    // - `x0 + 2·x1 ≤ 1` with candidates [0, 0] and [1, 2].
    //
    // Expect
    // ------
    // - [0, 0] is kept.
    // - [1, 2] maps to [1, 2] − (4/5)[1, 2] = [0.2, 0.4], with evaluate = 0.
    fn inequality_projection() {
        // Arrange
        let kind = ConstraintKind::Inequality;
        let mut inside =
            LinearConstraint::new(block(array![1.0, 2.0], 1.0), kind).expect("valid constraint");
        let mut outside = inside.clone();

        // Act
        inside.solve_proximal_step(array![0.0, 0.0].view()).expect("solve");
        outside.solve_proximal_step(array![1.0, 2.0].view()).expect("solve");

        // Assert
        assert_eq!(inside.x(), array![0.0, 0.0].view());
        assert!((outside.x()[0] - 0.2).abs() < 1e-12);
        assert!((outside.x()[1] - 0.4).abs() < 1e-12);
        assert_eq!(outside.evaluate(outside.x()), Ok(0.0));
        assert_eq!(outside.evaluate(array![1.0, 2.0].view()), Ok(f64::INFINITY));
    }

    #[test]
    // Purpose
    // -------
    // Check equality constraints project from both sides.
    //
    // Given
    // -----
    // - `x0 − x1 = 0` with candidate [1, −1].
    //
    // Expect
    // ------
    // - x = [0, 0]; the gradient is zero.
    fn equality_projection() {
        // Arrange
        let mut eq = LinearConstraint::new(block(array![1.0, -1.0], 0.0), ConstraintKind::Equality)
            .expect("valid constraint");

        // Act
        eq.solve_proximal_step(array![1.0, -1.0].view()).expect("solve");

        // Assert
        assert!(eq.x().iter().all(|v| v.abs() < 1e-12));
        assert_eq!(eq.gradient(eq.x()), Ok(array![0.0, 0.0]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure degenerate zero-coefficient constraints are checked at build time.
    //
    // Given
    // -----
    // - `0·x ≤ −1` (infeasible), `0·x ≤ 2` (always true), `0·x = 3`.
    //
    // Expect
    // ------
    // - The first and third are rejected with `InfeasibleConstraint`.
    fn zero_coefficients_checked_for_feasibility() {
        // Act / Assert
        assert_eq!(
            LinearConstraint::new(block(array![0.0], -1.0), ConstraintKind::Inequality),
            Err(TermError::InfeasibleConstraint { constant: -1.0 })
        );
        assert!(LinearConstraint::new(block(array![0.0], 2.0), ConstraintKind::Inequality).is_ok());
        assert!(matches!(
            LinearConstraint::new(block(array![0.0, 0.0], 3.0), ConstraintKind::Equality),
            Err(TermError::InfeasibleConstraint { .. })
        ));
    }
}
