//! Adapter that exposes a [`ConvexObjective`] as an `argmin` problem.
//!
//! The objective is minimized as reported; no sign flip is applied. Analytic gradients are validated and forwarded; when
//! an objective does not implement `grad`, a finite-difference gradient of
//! the cost closure is used instead.
use std::cell::RefCell;

use crate::optimization::{
    convex_minimizer::{
        finite_diff::fd_gradient,
        traits::ConvexObjective,
        types::{Cost, Grad, Point},
        validation::validate_grad,
    },
    errors::OptError,
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a [`ConvexObjective`] to `argmin`'s `CostFunction` and `Gradient`.
///
/// `F` may be unsized so that `&dyn ConvexObjective` can be minimized
/// directly.
#[derive(Debug)]
pub struct ArgMinAdapter<'a, F: ConvexObjective + ?Sized> {
    pub f: &'a F,
}

impl<'a, F: ConvexObjective + ?Sized> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Point;
    type Output = Cost;

    /// Evaluate the cost `f(x)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the objective's `value` via `?`.
    /// - Returns `NonFiniteCost` if the value is not finite.
    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(x)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: ConvexObjective + ?Sized> Gradient for ArgMinAdapter<'a, F> {
    type Param = Point;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `x`.
    ///
    /// Behavior:
    /// - If the objective implements `grad(x)`, it is validated and returned.
    /// - On `GradientNotImplemented`, a finite-difference gradient of the
    ///   cost is computed (central first, forward as a retry).
    ///
    /// The FD closure must return `f64`, so errors raised by `cost` are
    /// captured in `closure_err` and the closure returns `NaN`; the helper
    /// turns the captured error back into a real error.
    ///
    /// # Errors
    /// - Propagates objective errors other than `GradientNotImplemented`.
    /// - Propagates errors raised by cost evaluations performed during FD.
    /// - Returns validation errors for wrong dimension or non-finite entries.
    fn gradient(&self, x: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = x.len();
        match self.f.grad(x) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |x: &Point| -> f64 {
                    match self.cost(x) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                Ok(fd_gradient(x, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: ConvexObjective + ?Sized> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over an objective.
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}
