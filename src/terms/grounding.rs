//! Grounding boundary — turning grounded rules into potentials.
//!
//! Purpose
//! -------
//! Accept the per-term description emitted by an external grounder
//! ([`GroundedTerm`]) and build the matching [`Potential`] with its block
//! seeded from the global consensus vector.
//!
//! Key behaviors
//! -------------
//! - Soft rules become a [`SquaredHingeLoss`] or a [`LinearHingeLoss`]
//!   according to their [`DistanceMeasure`].
//! - Hard rules ([`RuleWeight::Hard`]) always become a [`LinearConstraint`];
//!   they never reach the hinge closed forms.
//! - [`gather_consensus`] slices the global vector through `z_indices` and
//!   reports out-of-range indices instead of panicking.
//!
//! Conventions
//! -----------
//! - JSON documents use lowercase tags: `"distance": "squared"`,
//!   `"weight": {"soft": 2.0}` or `"weight": "hard"`,
//!   `"comparator": "inequality"`.
use crate::terms::{
    block::{LocalBlock, TermId},
    config::ProximalConfig,
    constraint::{ConstraintKind, LinearConstraint},
    errors::{TermError, TermResult},
    fallback::FallbackMinimizer,
    linear_hinge::LinearHingeLoss,
    potential::Potential,
    squared_hinge::SquaredHingeLoss,
};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};

/// Weight stored in the block of a hard rule.
pub const HARD_RULE_WEIGHT: f64 = f64::INFINITY;

/// Shape of the hinge penalty of a soft rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMeasure {
    /// `w·max(c·x − k, 0)`
    Linear,
    /// `w·max(c·x − k, 0)²`
    #[default]
    Squared,
}

impl FromStr for DistanceMeasure {
    type Err = TermError;

    /// Parse a distance measure (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(DistanceMeasure::Linear),
            "squared" => Ok(DistanceMeasure::Squared),
            _ => Err(TermError::InvalidDistance { name: s.to_string() }),
        }
    }
}

/// Weight of a grounded rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleWeight {
    Soft(f64),
    Hard,
}

impl RuleWeight {
    /// Numeric weight stored in the term's block.
    pub fn value(&self) -> f64 {
        match self {
            RuleWeight::Soft(w) => *w,
            RuleWeight::Hard => HARD_RULE_WEIGHT,
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, RuleWeight::Hard)
    }
}

impl From<f64> for RuleWeight {
    /// `+∞` marks a hard rule; every other value is a soft weight.
    fn from(weight: f64) -> Self {
        if weight == f64::INFINITY { RuleWeight::Hard } else { RuleWeight::Soft(weight) }
    }
}

/// One grounded rule as produced by the grounder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundedTerm {
    pub term_id: TermId,
    pub coefficients: Vec<f64>,
    pub constant: f64,
    pub weight: RuleWeight,
    #[serde(default)]
    pub distance: DistanceMeasure,
    #[serde(default)]
    pub comparator: ConstraintKind,
    pub z_indices: Vec<usize>,
}

/// Parse a JSON array of grounded terms.
pub fn parse_grounded_terms(text: &str) -> TermResult<Vec<GroundedTerm>> {
    serde_json::from_str(text).map_err(|err| TermError::MalformedGrounding { text: err.to_string() })
}

/// Slice the global consensus vector through `z_indices`.
///
/// # Errors
/// - [`TermError::ZIndexOutOfRange`] for the first index past the end.
pub fn gather_consensus(
    global: ArrayView1<'_, f64>, z_indices: &[usize],
) -> TermResult<Array1<f64>> {
    let len = global.len();
    z_indices
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            global.get(index).copied().ok_or(TermError::ZIndexOutOfRange { position, index, len })
        })
        .collect()
}

/// Build the potential for one grounded term.
///
/// The block's `z` (and initial `x`) is gathered from `global_consensus`, its
/// step size comes from `config`, and squared-hinge terms share `fallback`.
///
/// # Errors
/// - Any block construction error (see [`LocalBlock::new`]).
/// - [`TermError::ZIndexOutOfRange`] from [`gather_consensus`].
/// - [`TermError::InvalidWeight`] for a non-finite soft weight.
/// - [`TermError::InfeasibleConstraint`] for an unsatisfiable hard rule.
pub fn build_potential(
    term: &GroundedTerm, global_consensus: ArrayView1<'_, f64>, config: &ProximalConfig,
    fallback: &Arc<dyn FallbackMinimizer>,
) -> TermResult<Potential> {
    let z = gather_consensus(global_consensus, &term.z_indices)?;
    let block = LocalBlock::new(
        term.term_id,
        Array1::from(term.coefficients.clone()),
        term.constant,
        term.weight.value(),
        config.step_size(),
        term.z_indices.clone(),
        z,
    )?;

    let potential: Potential = match (term.weight, term.distance) {
        (RuleWeight::Hard, _) => {
            log::debug!(
                "term {}: hard rule routed to a {:?} constraint",
                term.term_id,
                term.comparator
            );
            LinearConstraint::new(block, term.comparator)?.into()
        }
        (RuleWeight::Soft(_), DistanceMeasure::Squared) => {
            SquaredHingeLoss::new(block, Arc::clone(fallback))?.into()
        }
        (RuleWeight::Soft(_), DistanceMeasure::Linear) => LinearHingeLoss::new(block)?.into(),
    };
    Ok(potential)
}
