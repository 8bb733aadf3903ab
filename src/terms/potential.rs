//! Shared contract for local potential solvers.
//!
//! Purpose
//! -------
//! Every grounded term is a convex potential `f` over its local block. The
//! ADMM driver only needs three things from it: push the latest consensus
//! slice, run the proximal update, and read the new local primal `x`.
//! [`PotentialOptimizer`] captures that contract once and provides the
//! block bookkeeping as default methods, so each concrete kind only supplies
//! `evaluate`, `gradient` and `solve_local`.
//!
//! Key behaviors
//! -------------
//! - `solve_proximal_step(consensus)` = `set_consensus` then `solve_local`;
//!   a rejected consensus slice never reaches the solver.
//! - `augmented_value(point)` reports the proximal objective
//!   `g(point) = f(point) + (ρ/2)‖point − z + y/ρ‖²` for diagnostics.
//! - [`Potential`] is the closed set of kinds produced by grounding and
//!   forwards the contract to its variant.
//!
//! Conventions
//! -----------
//! - `evaluate` and `gradient` are side-effect free and accept any point of
//!   the block's arity (not only the current `x`).
use crate::terms::{
    block::{LocalBlock, TermId},
    constraint::LinearConstraint,
    errors::TermResult,
    linear_hinge::LinearHingeLoss,
    squared_hinge::SquaredHingeLoss,
};
use ndarray::{Array1, ArrayView1};

/// Local proximal solver over a [`LocalBlock`].
pub trait PotentialOptimizer: Send + Sync {
    // Required methods
    fn block(&self) -> &LocalBlock;

    fn block_mut(&mut self) -> &mut LocalBlock;

    /// Potential value `f(point)`.
    fn evaluate(&self, point: ArrayView1<'_, f64>) -> TermResult<f64>;

    /// Gradient (or subgradient) of `f` at `point`, without the ADMM penalty.
    fn gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>>;

    /// Minimize `f(x) + (ρ/2)‖x − z + y/ρ‖²` against the current `z` and `y`
    /// and store the result in `x`. On error `x` is left unchanged.
    fn solve_local(&mut self) -> TermResult<()>;

    // Provided methods
    fn solve_proximal_step(&mut self, consensus: ArrayView1<'_, f64>) -> TermResult<()> {
        self.set_consensus(consensus)?;
        self.solve_local()
    }

    fn set_consensus(&mut self, consensus: ArrayView1<'_, f64>) -> TermResult<()> {
        self.block_mut().set_consensus(consensus)
    }

    fn set_dual(&mut self, dual: ArrayView1<'_, f64>) -> TermResult<()> {
        self.block_mut().set_dual(dual)
    }

    fn dual_step(&mut self) {
        self.block_mut().dual_step();
    }

    fn augmented_value(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        Ok(self.evaluate(point)? + self.block().penalty_value(point)?)
    }

    fn candidate(&self) -> Array1<f64> {
        self.block().candidate()
    }

    fn primal_residual(&self) -> f64 {
        self.block().primal_residual()
    }

    fn term_id(&self) -> TermId {
        self.block().term_id()
    }

    fn arity(&self) -> usize {
        self.block().arity()
    }

    fn x(&self) -> ArrayView1<'_, f64> {
        self.block().x()
    }

    fn y(&self) -> ArrayView1<'_, f64> {
        self.block().y()
    }

    fn z(&self) -> ArrayView1<'_, f64> {
        self.block().z()
    }

    fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.block().coefficients()
    }

    fn constant(&self) -> f64 {
        self.block().constant()
    }

    fn weight(&self) -> f64 {
        self.block().weight()
    }

    fn step_size(&self) -> f64 {
        self.block().step_size()
    }

    fn z_indices(&self) -> &[usize] {
        self.block().z_indices()
    }
}

/// Kind tag of a [`Potential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotentialKind {
    SquaredHinge,
    LinearHinge,
    Constraint,
}

/// Closed set of potential kinds a grounded term can become.
#[derive(Debug, Clone)]
pub enum Potential {
    SquaredHinge(SquaredHingeLoss),
    LinearHinge(LinearHingeLoss),
    Constraint(LinearConstraint),
}

impl Potential {
    pub fn kind(&self) -> PotentialKind {
        match self {
            Potential::SquaredHinge(_) => PotentialKind::SquaredHinge,
            Potential::LinearHinge(_) => PotentialKind::LinearHinge,
            Potential::Constraint(_) => PotentialKind::Constraint,
        }
    }

    fn inner(&self) -> &dyn PotentialOptimizer {
        match self {
            Potential::SquaredHinge(p) => p,
            Potential::LinearHinge(p) => p,
            Potential::Constraint(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PotentialOptimizer {
        match self {
            Potential::SquaredHinge(p) => p,
            Potential::LinearHinge(p) => p,
            Potential::Constraint(p) => p,
        }
    }
}

impl PotentialOptimizer for Potential {
    fn block(&self) -> &LocalBlock {
        self.inner().block()
    }

    fn block_mut(&mut self) -> &mut LocalBlock {
        self.inner_mut().block_mut()
    }

    fn evaluate(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        self.inner().evaluate(point)
    }

    fn gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>> {
        self.inner().gradient(point)
    }

    fn solve_local(&mut self) -> TermResult<()> {
        self.inner_mut().solve_local()
    }
}

impl From<SquaredHingeLoss> for Potential {
    fn from(value: SquaredHingeLoss) -> Self {
        Potential::SquaredHinge(value)
    }
}

impl From<LinearHingeLoss> for Potential {
    fn from(value: LinearHingeLoss) -> Self {
        Potential::LinearHinge(value)
    }
}

impl From<LinearConstraint> for Potential {
    fn from(value: LinearConstraint) -> Self {
        Potential::Constraint(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{constraint::ConstraintKind, errors::TermError};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forwarding of the contract through the `Potential` enum.
    // - Provided methods (`solve_proximal_step`, `augmented_value`).
    //
    // They intentionally DO NOT cover:
    // - Kind-specific solve math (see each kind's module).
    // -------------------------------------------------------------------------

    fn block_1(consensus: f64) -> LocalBlock {
        LocalBlock::new(3, array![1.0], 1.0, 1.0, 1.0, vec![0], array![consensus])
            .expect("valid block")
    }

    #[test]
    // Purpose
    // -------
    // Verify that `Potential` forwards kind, accessors and the solve.
    //
    // Given
    // -----
    // - A linear hinge and a constraint, both `x ≤ 1`, consensus 3.
    //
    // Expect
    // ------
    // - Kinds are tagged correctly; after a solve both report `x` through the
    //   enum and the constraint lands exactly on the boundary.
    fn potential_enum_forwards_contract() {
        // Arrange
        let mut hinge: Potential =
            LinearHingeLoss::new(block_1(0.0)).expect("valid hinge").into();
        let mut constraint: Potential =
            LinearConstraint::new(block_1(0.0), ConstraintKind::Inequality)
                .expect("valid constraint")
                .into();

        // Act
        hinge.solve_proximal_step(array![3.0].view()).expect("hinge solve");
        constraint.solve_proximal_step(array![3.0].view()).expect("constraint solve");

        // Assert
        assert_eq!(hinge.kind(), PotentialKind::LinearHinge);
        assert_eq!(constraint.kind(), PotentialKind::Constraint);
        assert_eq!(hinge.term_id(), 3);
        assert_eq!(hinge.z(), array![3.0].view());
        // w/ρ = 1: x' = 3 − 1 = 2 still violates, stays in the shifted regime.
        assert!((hinge.x()[0] - 2.0).abs() < 1e-12);
        assert!((constraint.x()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a rejected consensus slice never reaches the solver.
    //
    // Given
    // -----
    // - An arity-1 linear hinge and a length-2 consensus slice.
    //
    // Expect
    // ------
    // - `DimensionMismatch`; `x` and `z` unchanged.
    fn solve_proximal_step_rejects_bad_consensus_without_mutation() {
        // Arrange
        let mut p: Potential = LinearHingeLoss::new(block_1(0.5)).expect("valid hinge").into();

        // Act
        let result = p.solve_proximal_step(array![1.0, 2.0].view());

        // Assert
        assert!(matches!(result, Err(TermError::DimensionMismatch { .. })));
        assert_eq!(p.x(), array![0.5].view());
        assert_eq!(p.z(), array![0.5].view());
    }

    #[test]
    // Purpose
    // -------
    // Check `augmented_value` adds the proximal penalty to the potential.
    //
    // Given
    // -----
    // - Linear hinge `max(x − 1, 0)`, ρ = 1, z = 0, y = 0, point 3.
    //
    // Expect
    // ------
    // - `f(3) + ½·9 = 2 + 4.5 = 6.5`.
    fn augmented_value_adds_penalty() {
        // Arrange
        let p: Potential = LinearHingeLoss::new(block_1(0.0)).expect("valid hinge").into();

        // Act
        let g = p.augmented_value(array![3.0].view()).expect("value");

        // Assert
        assert!((g - 6.5).abs() < 1e-12);
    }
}
