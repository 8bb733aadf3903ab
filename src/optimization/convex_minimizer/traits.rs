//! Public API surface for generic convex minimization.
//!
//! - [`ConvexObjective`]: trait callers implement for the function to minimize.
//! - [`MinimizerOptions`] and [`Tolerances`]: configuration for the minimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`MinimizeOutcome`]: normalized result returned by the high-level `minimize` API.
//!
//! Convention: the objective is minimized as reported. If an analytic gradient
//! is provided it must be the gradient of that same objective; otherwise a
//! finite-difference gradient is computed automatically.
use crate::optimization::{
    convex_minimizer::{
        Cost, FnEvalMap, Grad, Point,
        validation::{validate_minimizer, validate_value, verify_tol_cost, verify_tol_grad},
    },
    errors::{OptError, OptResult},
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Differentiable convex objective `f: ℝⁿ → ℝ`.
///
/// Required:
/// - `value(&Point) -> OptResult<Cost>`: evaluate `f(x)`.
///
/// Optional:
/// - `grad(&Point) -> OptResult<Grad>`: analytic gradient `∇f(x)`. If not
///   implemented, finite differences are used automatically.
/// - `check(&Point) -> OptResult<()>`: validation hook called once on the
///   starting point before minimization. The default only rejects empty or
///   non-finite points.
///
/// The trait is object safe so it can be handed across the fallback boundary
/// as `&dyn ConvexObjective`.
pub trait ConvexObjective {
    // Required methods
    fn value(&self, x: &Point) -> OptResult<Cost>;

    // Optional methods
    fn grad(&self, _x: &Point) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn check(&self, x: &Point) -> OptResult<()> {
        if x.is_empty() {
            return Err(OptError::EmptySeed);
        }
        for (index, &value) in x.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidSeed { index, value });
            }
        }
        Ok(())
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    /// Parse a line-search choice from a string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Minimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = None` (Argmin default), `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MinimizerOptions {
    /// Create a new set of minimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: None, max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the minimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `x_hat`: best point found.
/// - `value`: objective value `f(x̂)`.
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of minimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`
///   (keys such as `cost_count`, `gradient_count`).
/// - `grad_norm`: norm of the last available gradient, if present.
/// - `max_iters_reached`: `true` when the run stopped on the iteration cap
///   rather than on a tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    pub x_hat: Point,
    pub value: f64,
    pub converged: bool,
    pub max_iters_reached: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl MinimizeOutcome {
    /// Build a validated [`MinimizeOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `x_hat` check via `validate_minimizer` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `x_hat` or `value`.
    pub fn new(
        x_hat_opt: Option<Point>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let x_hat = validate_minimizer(x_hat_opt)?;
        validate_value(value)?;
        let max_iters_reached = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        );
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            _ => (true, format!("{termination:?}")),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            x_hat,
            value,
            converged,
            max_iters_reached,
            status,
            iterations,
            fn_evals,
            grad_norm,
        })
    }
}
