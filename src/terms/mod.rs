//! terms — local proximal solvers for grounded rule potentials.
//!
//! Purpose
//! -------
//! Implement the per-term half of consensus ADMM: each grounded rule owns a
//! small [`LocalBlock`](block::LocalBlock) and, once per iteration, solves
//!
//! ```text
//! x ← argmin_x  f(x) + (ρ/2)‖x − z + y/ρ‖²
//! ```
//!
//! for its potential `f`, given the consensus slice `z` and scaled dual `y`
//! pushed in by an external driver.
//!
//! Key behaviors
//! -------------
//! - [`potential::PotentialOptimizer`] is the shared contract
//!   (`set_consensus`, `solve_proximal_step`, `evaluate`, `gradient`, block
//!   accessors and ADMM bookkeeping).
//! - [`squared_hinge::SquaredHingeLoss`] solves arity 1 and 2 in closed form
//!   and delegates larger blocks to a [`fallback::FallbackMinimizer`].
//! - [`linear_hinge::LinearHingeLoss`] and
//!   [`constraint::LinearConstraint`] cover the linear distance measure and
//!   hard rules, both in closed form.
//! - [`grounding::build_potential`] turns a
//!   [`grounding::GroundedTerm`] into the right [`potential::Potential`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Term values are valid by construction; construction errors are reported
//!   before any state exists.
//! - A failed update (bad consensus slice, fallback failure) leaves the
//!   block's vectors unchanged.
//! - Terms own no threads and share only the immutable fallback, so a driver
//!   may solve many terms in parallel.
//!
//! Conventions
//! -----------
//! - Fallible operations return [`errors::TermResult`].
//! - Branch decisions are logged at `trace`, construction at `debug`, and
//!   fallback failures at `warn` through the `log` facade.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own math; the crate-level
//!   integration test drives several terms through a consensus loop.

pub mod block;
pub mod config;
pub mod constraint;
pub mod errors;
pub mod fallback;
pub mod grounding;
pub mod linear_hinge;
pub mod potential;
pub mod squared_hinge;
pub mod validation;

pub mod prelude {
    pub use super::block::{LocalBlock, TermId};
    pub use super::config::ProximalConfig;
    pub use super::constraint::{ConstraintKind, LinearConstraint};
    pub use super::errors::{TermError, TermResult};
    pub use super::fallback::{FallbackMinimizer, LbfgsFallback};
    pub use super::grounding::{
        DistanceMeasure, GroundedTerm, RuleWeight, build_potential, gather_consensus,
        parse_grounded_terms,
    };
    pub use super::linear_hinge::LinearHingeLoss;
    pub use super::potential::{Potential, PotentialKind, PotentialOptimizer};
    pub use super::squared_hinge::SquaredHingeLoss;
}
