//! optimization — generic minimization stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical optimization layer the term solvers lean on when no
//! closed form is available: an Argmin-backed L-BFGS minimizer for
//! differentiable convex objectives together with a single error/result
//! surface.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing convex objectives** `f(x)`
//!   (`convex_minimizer`), including configuration of solvers and stopping
//!   criteria.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Points and gradients are `ndarray` vectors (`Point`, `Grad`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - Term solvers (`crate::terms`) reach this module only through the
//!   injected `FallbackMinimizer` capability; `LbfgsFallback` is the one
//!   implementation that calls [`convex_minimizer::minimize`].

pub mod convex_minimizer;
pub mod errors;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::convex_minimizer::prelude::*;
    pub use super::errors::{OptError, OptResult};
}
