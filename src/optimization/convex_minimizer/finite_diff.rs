//! convex_minimizer::finite_diff — finite-difference gradient helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient approximations for objectives that do
//! not implement [`ConvexObjective::grad`](super::ConvexObjective::grad),
//! with error capture and post-hoc validation, so the adapter can request
//! derivatives without depending directly on the `finitediff` API.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective during finite differencing is routed
//!   into the shared `closure_err` cell and treated as a hard failure.
//! - Gradients returned from this module always satisfy [`validate_grad`].
//!
//! Conventions
//! -----------
//! - Central differences are preferred; forward differences are used only as
//!   a fallback when the central approximation fails or hits an error.
use crate::optimization::{
    convex_minimizer::{Grad, Point, validation::validate_grad},
    errors::OptResult,
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — central-difference gradient with a forward-difference retry.
///
/// Parameters
/// ----------
/// - `x`: `&Point`
///   Point at which the gradient is approximated; its length is the expected
///   gradient dimension.
/// - `func`: `&G`
///   Objective closure. It must write any evaluation error into
///   `closure_err` and return `NaN` in that case.
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Shared error slot for `func`.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   - `Ok(grad)` from the central scheme when it evaluates cleanly and
///     validates.
///   - Otherwise the result of [`run_fd_diff`].
///
/// Errors
/// ------
/// - Any error captured from `func` during the forward-difference retry.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` when the
///   forward-difference gradient fails validation.
pub fn fd_gradient<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let central = x.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, x.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(x, func, closure_err)
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, performs `forward_diff`, returns any captured error,
/// then validates the gradient against `x.len()`.
///
/// # Errors
/// - `OptError` (via `impl From<Error> for OptError`) when `func` signaled an
///   error through `closure_err`.
/// - Validation errors from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = x.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, x.len())?;
    Ok(fd_grad)
}
