//! convex_minimizer — argmin-powered generic convex minimization.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed layer for **minimizing differentiable
//! convex objectives** `f(x)`. Callers implement a single trait,
//! [`ConvexObjective`], and invoke [`minimize`] to run L-BFGS with a
//! configurable line search, tolerances, and finite-difference fallbacks.
//! Within this crate it is the engine behind the proximal fallback used by
//! hinge-loss terms whose arity has no closed-form solve.
//!
//! Key behaviors
//! -------------
//! - Bridge objectives into Argmin cost functions via [`adapter::ArgMinAdapter`].
//! - Expose a single entrypoint [`minimize`] that:
//!   - validates the starting point with [`ConvexObjective::check`],
//!   - selects an L-BFGS solver via [`builders`] based on [`LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into a [`MinimizeOutcome`].
//! - Provide finite-difference gradients in [`finite_diff`] when analytic
//!   derivatives are missing, with post-hoc validation and error capture.
//! - Centralize configuration ([`Tolerances`], [`MinimizerOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - [`ConvexObjective::value`] and [`ConvexObjective::grad`] treat invalid
//!   inputs as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Vectors use the canonical aliases [`Point`] and [`Grad`]; all are
//!   assumed finite whenever minimization proceeds.
//! - Configuration types are validated on construction and treated as
//!   internally consistent by the solver layer.
//!
//! Conventions
//! -----------
//! - Errors bubble up as `OptResult<T>`; this module and its children never
//!   intentionally panic or use `unsafe`.
//! - Progress is reported through the `log` facade at `trace` level, plus an
//!   optional slog observer behind the `obs_slog` feature.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover gradient handling in [`adapter`], solver
//!   construction in [`builders`], finite differences in [`finite_diff`],
//!   validation in [`validation`], configuration invariants in [`traits`],
//!   and end-to-end quadratic minimization in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{ConvexObjective, LineSearcher, MinimizeOutcome, MinimizerOptions, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Point};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use admm_terms::optimization::convex_minimizer::prelude::*;
//
// to import the main minimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        ConvexObjective, LineSearcher, MinimizeOutcome, MinimizerOptions, Tolerances,
    };
    pub use super::types::{Cost, Grad, Point};
}
