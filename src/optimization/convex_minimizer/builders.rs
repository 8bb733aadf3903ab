//! convex_minimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the
//! generic convex minimizer. These helpers hide Argmin’s generic wiring and
//! apply crate-level options (tolerances, memory size) so higher-level code
//! can request a configured solver without touching Argmin-specific types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set an initial point or `max_iters`; these are
//!   runtime concerns applied by the runner (`run_lbfgs`).
//! - Errors are always reported via [`OptResult`]; the underlying
//!   `argmin::core::Error` values never leak across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    convex_minimizer::{
        traits::MinimizerOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Point,
        },
    },
    errors::OptResult,
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and the
/// optional gradient / cost-change tolerances.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
///   tolerance.
pub fn build_optimizer_hager_zhang(opts: &MinimizerOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
///   tolerance.
pub fn build_optimizer_more_thuente(opts: &MinimizerOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// configure_lbfgs — apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type `L`. When a tolerance is `None`, the
/// corresponding `with_tolerance_*` method is not called and Argmin’s
/// defaults remain in effect.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) when `with_tolerance_grad`
///   or `with_tolerance_cost` rejects a tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Point, Grad, Cost>, opts: &MinimizerOptions,
) -> OptResult<LBFGS<L, Point, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::convex_minimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of L-BFGS solvers with both line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the builder paths.
    // - Application of tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (see `run` / `api`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure both builders succeed with the default memory.
    //
    // Given
    // -----
    // - Valid tolerances and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)`.
    fn builders_use_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let hz = MinimizerOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("options should be valid");
        let mt = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("options should be valid");

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&hz).is_ok());
        assert!(build_optimizer_more_thuente(&mt).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that explicit memory values are accepted.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(11)` for Hager–Zhang and `Some(3)` for More–Thuente.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)`.
    fn builders_respect_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(25)).expect("Tolerances should be valid");
        let hz = MinimizerOptions::new(tols, LineSearcher::HagerZhang, false, Some(11))
            .expect("options should be valid");
        let mt = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, Some(3))
            .expect("options should be valid");

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&hz).is_ok());
        assert!(build_optimizer_more_thuente(&mt).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that `configure_lbfgs` leaves the solver constructible when both
    // tolerances are `None`.
    //
    // Given
    // -----
    // - Tolerances with only `max_iter` set.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("options should be valid");

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok(), "configure_lbfgs should succeed when both tolerances are None");
    }
}
