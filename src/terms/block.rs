//! Local block state — the per-term slice of an ADMM problem.
//!
//! Purpose
//! -------
//! Hold everything one grounded term needs to run its proximal update: the
//! fixed linear form `c·x − k`, the term weight, the shared step size ρ, the
//! map into the global consensus vector, and the three mutable vectors
//! `x` (local primal), `y` (scaled dual) and `z` (local consensus view).
//!
//! Key behaviors
//! -------------
//! - [`LocalBlock::new`] validates every construction invariant before any
//!   state exists; a `LocalBlock` value is always internally consistent.
//! - `x` starts equal to the initial consensus slice and `y` starts at zero.
//! - Consensus and dual updates check length and finiteness first and only
//!   then overwrite, so a rejected update leaves the block untouched.
//! - Bookkeeping helpers (`candidate`, `dual_step`, `primal_residual`,
//!   `penalty_value`, `penalty_gradient`) are exposed for drivers and for the
//!   potential solvers.
//!
//! Invariants & assumptions
//! ------------------------
//! - `coefficients`, `z_indices`, `x`, `y`, `z` all have the same length
//!   (the arity, `>= 1`).
//! - `step_size` is finite and `> 0`; `weight` is `>= 0` (`+∞` is allowed
//!   only for hard rules, which hinge constructors reject).
//! - `z_indices` contains no duplicates.
//!
//! Conventions
//! -----------
//! - The scaled-dual convention is used throughout: the proximal penalty is
//!   `(ρ/2)‖x − z + y/ρ‖²` and the dual ascent is `y ← y + ρ(x − z)`.
use crate::terms::{
    errors::TermResult,
    validation::{
        validate_arity, validate_coefficients, validate_constant, validate_len,
        validate_local_vector, validate_step_size, validate_weight, validate_z_indices,
    },
};
use ndarray::{Array1, ArrayView1};

/// Immutable identity of a grounded term.
pub type TermId = u64;

/// Per-term ADMM state.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBlock {
    term_id: TermId,
    coefficients: Array1<f64>,
    constant: f64,
    weight: f64,
    step_size: f64,
    z_indices: Vec<usize>,
    x: Array1<f64>,
    y: Array1<f64>,
    z: Array1<f64>,
}

impl LocalBlock {
    /// Build a validated block.
    ///
    /// Parameters
    /// ----------
    /// - `term_id`: identity of the grounded term.
    /// - `coefficients`: `c`, one finite entry per local variable.
    /// - `constant`: `k`, finite threshold of the hinge `c·x − k`.
    /// - `weight`: `w >= 0`.
    /// - `step_size`: ρ, finite and `> 0`.
    /// - `z_indices`: global consensus position of each local variable.
    /// - `initial_consensus`: starting `z`; `x` is initialized to it and `y`
    ///   to zero.
    ///
    /// Errors
    /// ------
    /// - [`TermError::EmptyBlock`](crate::terms::errors::TermError::EmptyBlock)
    ///   for zero arity.
    /// - `DimensionMismatch` when `z_indices` or `initial_consensus` has the
    ///   wrong length.
    /// - `InvalidCoefficient`, `InvalidConstant`, `InvalidWeight`,
    ///   `InvalidStepSize`, `DuplicateZIndex`, `NonFiniteInput` for the
    ///   corresponding invariant.
    pub fn new(
        term_id: TermId, coefficients: Array1<f64>, constant: f64, weight: f64, step_size: f64,
        z_indices: Vec<usize>, initial_consensus: Array1<f64>,
    ) -> TermResult<Self> {
        let arity = coefficients.len();
        validate_arity(arity)?;
        validate_coefficients(coefficients.view())?;
        validate_constant(constant)?;
        validate_weight(weight)?;
        validate_step_size(step_size)?;
        validate_z_indices(&z_indices, arity)?;
        validate_local_vector("initial consensus", initial_consensus.view(), arity)?;

        let x = initial_consensus.clone();
        let y = Array1::zeros(arity);
        Ok(Self {
            term_id,
            coefficients,
            constant,
            weight,
            step_size,
            z_indices,
            x,
            y,
            z: initial_consensus,
        })
    }

    pub fn term_id(&self) -> TermId {
        self.term_id
    }

    /// Number of local variables.
    pub fn arity(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn z_indices(&self) -> &[usize] {
        &self.z_indices
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    pub fn z(&self) -> ArrayView1<'_, f64> {
        self.z.view()
    }

    /// Overwrite `z` with the driver's pre-sliced consensus values.
    ///
    /// The slice must have the block's arity and be finite; on error `z` is
    /// left unchanged.
    pub fn set_consensus(&mut self, consensus: ArrayView1<'_, f64>) -> TermResult<()> {
        validate_local_vector("consensus", consensus, self.arity())?;
        self.z.assign(&consensus);
        Ok(())
    }

    /// Overwrite the scaled dual `y`. On error `y` is left unchanged.
    pub fn set_dual(&mut self, dual: ArrayView1<'_, f64>) -> TermResult<()> {
        validate_local_vector("dual", dual, self.arity())?;
        self.y.assign(&dual);
        Ok(())
    }

    /// Scaled-dual ascent step `y ← y + ρ(x − z)`.
    pub fn dual_step(&mut self) {
        let rho = self.step_size;
        self.y.zip_mut_with(&(&self.x - &self.z), |y, &r| *y += rho * r);
    }

    /// Unconstrained minimizer of the proximal penalty, `v = z − y/ρ`.
    pub fn candidate(&self) -> Array1<f64> {
        &self.z - &(&self.y / self.step_size)
    }

    /// Primal residual `‖x − z‖₂`.
    pub fn primal_residual(&self) -> f64 {
        (&self.x - &self.z).dot(&(&self.x - &self.z)).sqrt()
    }

    /// `c·point − k` for a point of the block's arity.
    pub fn margin(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        self.check_point(point)?;
        Ok(self.coefficients.dot(&point) - self.constant)
    }

    /// Proximal penalty `(ρ/2)‖point − z + y/ρ‖²`.
    pub fn penalty_value(&self, point: ArrayView1<'_, f64>) -> TermResult<f64> {
        self.check_point(point)?;
        let shifted = &point - &self.candidate();
        Ok(0.5 * self.step_size * shifted.dot(&shifted))
    }

    /// Gradient of the proximal penalty, `ρ(point − z) + y`.
    pub fn penalty_gradient(&self, point: ArrayView1<'_, f64>) -> TermResult<Array1<f64>> {
        self.check_point(point)?;
        Ok((&point - &self.z) * self.step_size + &self.y)
    }

    /// Reject points whose length differs from the arity.
    pub fn check_point(&self, point: ArrayView1<'_, f64>) -> TermResult<()> {
        validate_len("point", self.arity(), point.len())
    }

    /// Store a solved local primal. Only solvers call this, always with a
    /// vector of the block's arity.
    pub(crate) fn set_x(&mut self, x: Array1<f64>) {
        debug_assert_eq!(x.len(), self.arity());
        self.x = x;
    }
}
