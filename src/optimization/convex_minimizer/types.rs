//! convex_minimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the generic
//! convex minimizer so the rest of the crate stays agnostic to `ndarray`
//! and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Point` and `Grad` are column vectors whose length is the dimension of
//!   the problem being minimized (for proximal fallbacks, the term arity).
//! - `Cost` is the scalar objective value; no sign flips happen anywhere in
//!   this module, the minimizer minimizes exactly what the objective reports.
//! - `DEFAULT_LBFGS_MEM` encodes the typical history size for L-BFGS;
//!   callers may override it via [`MinimizerOptions`](super::MinimizerOptions).
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Point `x` in the search space of a convex objective.
pub type Point = Array1<f64>;

/// Gradient vector `∇f(x)`, matching the shape of `Point`.
pub type Grad = Array1<f64>;

/// Scalar objective value `f(x)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Point, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Point, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Point, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Point, Grad, Cost>;
