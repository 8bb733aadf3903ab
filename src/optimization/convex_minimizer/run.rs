//! Execution helper that runs an `argmin` solver on a convex objective and
//! returns a crate-friendly [`MinimizeOutcome`].
use crate::optimization::{
    convex_minimizer::{
        ConvexObjective, Grad, MinimizeOutcome, MinimizerOptions, Point, adapter::ArgMinAdapter,
    },
    errors::OptResult,
};
use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization for a convex objective.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the objective via [`ArgMinAdapter`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang/More–Thuente),
/// - the starting point `x0`,
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///
/// then executes the solver and converts the result into [`MinimizeOutcome`].
///
/// # Type Parameters
/// - `F`: objective implementing [`ConvexObjective`] (may be `dyn`).
/// - `S`: any `argmin` solver whose `Problem` is `ArgMinAdapter<'a, F>` and
///   whose `IterState` uses `Point`, `Grad`, and `f64`.
///
/// # Logging
/// When `trace` logging is enabled, the objective value and gradient norm at
/// `x0` are logged before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (solver errors, line-search
///   failures, objective errors) via `From<argmin::core::Error>`.
/// - Propagates validation errors raised while building [`MinimizeOutcome`].
pub fn run_lbfgs<'a, F, S>(
    x0: Point, opts: &MinimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<MinimizeOutcome>
where
    F: ConvexObjective + ?Sized,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Point, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if log::log_enabled!(log::Level::Trace) {
        log_initial_state(&x0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    MinimizeOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

fn log_initial_state<F>(x0: &Point, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: ConvexObjective + ?Sized,
{
    let f0 = problem.cost(x0)?;
    let g0n = problem.gradient(x0).ok().map(|g| g.l2_norm());
    log::trace!(
        "init: f(x0) = {:.6}{}",
        f0,
        g0n.map(|n| format!(", ||grad|| = {n:.6}")).unwrap_or_default()
    );
    Ok(())
}
