//! admm_terms — local proximal solvers for consensus-ADMM rule inference.
//!
//! Purpose
//! -------
//! Serve as the crate root for the per-term optimization core of a
//! consensus-ADMM engine over weighted logical rules. Every grounded rule is
//! a convex potential over a small block of variables; this crate solves the
//! local proximal subproblem of each block and leaves the consensus
//! averaging, dual bookkeeping policy and stopping decisions to the caller.
//!
//! Key behaviors
//! -------------
//! - [`terms`]: local blocks, the potential contract, squared/linear hinge
//!   losses, hard linear constraints, grounding and run configuration.
//! - [`optimization`]: the argmin-backed L-BFGS layer used when a proximal
//!   step has no closed form.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray` 1-D arrays.
//! - Errors are returned as values ([`terms::errors::TermError`],
//!   [`optimization::errors::OptError`]); library code does not panic on bad
//!   inputs and never installs a logger.
//!
//! Example
//! -------
//! ```
//! use admm_terms::terms::prelude::*;
//! use ndarray::array;
//!
//! let block = LocalBlock::new(0, array![1.0], 0.0, 1.0, 1.0, vec![0], array![0.0])?;
//! let mut term = SquaredHingeLoss::new(block, ProximalConfig::default().lbfgs_fallback())?;
//! term.solve_proximal_step(array![2.0].view())?;
//! assert!((term.x()[0] - 2.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), TermError>(())
//! ```

pub mod optimization;
pub mod terms;
