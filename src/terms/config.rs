//! Run-level configuration for local term solvers.
//!
//! [`ProximalConfig`] bundles the ADMM step size ρ shared by every term of a
//! run with the options of the default L-BFGS fallback. It is built either
//! programmatically through [`ProximalConfig::new`] or from JSON through
//! [`ProximalConfig::from_json`]; both paths validate every field.
//!
//! JSON layout (every field optional):
//!
//! ```json
//! {
//!   "step_size": 1.0,
//!   "fallback": {
//!     "tol_grad": 1e-8,
//!     "tol_cost": null,
//!     "max_iter": 500,
//!     "line_searcher": "MoreThuente",
//!     "verbose": false,
//!     "lbfgs_mem": 7
//!   }
//! }
//! ```
//!
//! An omitted `fallback` section uses [`MinimizerOptions::default`]. Fields
//! omitted from a present section take the same defaults, so a section that
//! only sets `tol_grad` still caps the run at 500 iterations.
use crate::{
    optimization::convex_minimizer::{LineSearcher, MinimizerOptions, Tolerances},
    terms::{
        errors::{TermError, TermResult},
        fallback::{FallbackMinimizer, LbfgsFallback},
        validation::validate_step_size,
    },
};
use serde::Deserialize;
use std::sync::Arc;

/// Default ADMM step size ρ.
pub const DEFAULT_STEP_SIZE: f64 = 1.0;

/// Validated solver configuration shared by every term of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximalConfig {
    step_size: f64,
    fallback: MinimizerOptions,
}

impl ProximalConfig {
    /// # Errors
    /// - [`TermError::InvalidStepSize`] if `step_size` is non-finite or `<= 0`.
    pub fn new(step_size: f64, fallback: MinimizerOptions) -> TermResult<Self> {
        validate_step_size(step_size)?;
        Ok(Self { step_size, fallback })
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn fallback_options(&self) -> &MinimizerOptions {
        &self.fallback
    }

    /// Shared L-BFGS fallback built from these options.
    pub fn lbfgs_fallback(&self) -> Arc<dyn FallbackMinimizer> {
        Arc::new(LbfgsFallback::new(self.fallback.clone()))
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// - [`TermError::InvalidConfig`] for malformed JSON, unknown fields, or
    ///   invalid tolerances / line-search names / memory.
    /// - [`TermError::InvalidStepSize`] for a bad `step_size`.
    pub fn from_json(text: &str) -> TermResult<Self> {
        let raw: RawProximalConfig = serde_json::from_str(text)
            .map_err(|err| TermError::InvalidConfig { text: err.to_string() })?;
        let fallback = match raw.fallback {
            Some(raw_fallback) => raw_fallback.into_options()?,
            None => MinimizerOptions::default(),
        };
        Self::new(raw.step_size, fallback)
    }
}

impl Default for ProximalConfig {
    fn default() -> Self {
        Self { step_size: DEFAULT_STEP_SIZE, fallback: MinimizerOptions::default() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProximalConfig {
    #[serde(default = "default_step_size")]
    step_size: f64,
    #[serde(default)]
    fallback: Option<RawFallbackConfig>,
}

fn default_step_size() -> f64 {
    DEFAULT_STEP_SIZE
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFallbackConfig {
    tol_grad: Option<f64>,
    tol_cost: Option<f64>,
    max_iter: Option<usize>,
    line_searcher: Option<String>,
    verbose: bool,
    lbfgs_mem: Option<usize>,
}

impl RawFallbackConfig {
    fn into_options(self) -> TermResult<MinimizerOptions> {
        let invalid = |err: crate::optimization::errors::OptError| TermError::InvalidConfig {
            text: err.to_string(),
        };
        let defaults = MinimizerOptions::default();
        let tols = Tolerances::new(
            self.tol_grad.or(defaults.tols.tol_grad),
            self.tol_cost.or(defaults.tols.tol_cost),
            self.max_iter.or(defaults.tols.max_iter),
        )
        .map_err(invalid)?;
        let line_searcher = match self.line_searcher {
            Some(name) => name.parse::<LineSearcher>().map_err(invalid)?,
            None => defaults.line_searcher,
        };
        let lbfgs_mem = self.lbfgs_mem.or(defaults.lbfgs_mem);
        MinimizerOptions::new(tols, line_searcher, self.verbose, lbfgs_mem).map_err(invalid)
    }
}
