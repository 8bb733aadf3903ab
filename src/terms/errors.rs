//! Errors for local term solvers (construction invariants, consensus and dual
//! updates, grounding, configuration, and fallback minimizer failures).
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions inside a term's local
//!   block unless a variant says it refers to the global consensus vector.
//! - Construction-invariant violations are reported before any state is
//!   built or mutated; a value of a term type is always valid.
//! - Fallback minimizer failures are wrapped verbatim in
//!   [`TermError::Fallback`] so callers can inspect the backend reason.
use crate::optimization::errors::OptError;

/// Result alias for term construction and proximal updates.
pub type TermResult<T> = Result<T, TermError>;

/// Unified error type for local term solvers.
#[derive(Debug, Clone, PartialEq)]
pub enum TermError {
    // ---- Construction invariants ----
    /// A term must have at least one local variable.
    EmptyBlock,

    /// A vector does not have the arity of the block.
    DimensionMismatch { what: &'static str, expected: usize, found: usize },

    /// Step size (ADMM penalty ρ) must be finite and > 0.
    InvalidStepSize { value: f64 },

    /// Soft-rule weight must be finite and >= 0.
    InvalidWeight { value: f64, reason: &'static str },

    /// Coefficients must be finite.
    InvalidCoefficient { index: usize, value: f64 },

    /// Threshold constant must be finite.
    InvalidConstant { value: f64 },

    /// A local vector (consensus, dual, seed) contains a non-finite entry.
    NonFiniteInput { what: &'static str, index: usize, value: f64 },

    /// Two local variables map to the same consensus slot.
    DuplicateZIndex { index: usize, first: usize, second: usize },

    // ---- Grounding ----
    /// A consensus index points past the end of the global vector.
    ZIndexOutOfRange { position: usize, index: usize, len: usize },

    /// A grounded-term document could not be parsed.
    MalformedGrounding { text: String },

    /// Unknown distance measure name.
    InvalidDistance { name: String },

    // ---- Constraints ----
    /// A constraint with all-zero coefficients cannot be satisfied.
    InfeasibleConstraint { constant: f64 },

    // ---- Proximal solve ----
    /// A closed-form proximal step produced a non-finite entry.
    NonFiniteSolution { term_id: u64, index: usize, value: f64 },

    // ---- Configuration ----
    /// Configuration could not be parsed or validated.
    InvalidConfig { text: String },

    // ---- Fallback minimizer ----
    /// The generic minimizer failed while solving a proximal step.
    Fallback(OptError),
}

impl std::error::Error for TermError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TermError::Fallback(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for TermError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction invariants ----
            TermError::EmptyBlock => write!(f, "Term has no local variables"),
            TermError::DimensionMismatch { what, expected, found } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, found {found}")
            }
            TermError::InvalidStepSize { value } => {
                write!(f, "Invalid step size {value}: must be finite and > 0")
            }
            TermError::InvalidWeight { value, reason } => {
                write!(f, "Invalid weight {value}: {reason}")
            }
            TermError::InvalidCoefficient { index, value } => {
                write!(f, "Invalid coefficient at index {index}: {value}, must be finite")
            }
            TermError::InvalidConstant { value } => {
                write!(f, "Invalid constant {value}: must be finite")
            }
            TermError::NonFiniteInput { what, index, value } => {
                write!(f, "Non-finite {what} entry at index {index}: {value}")
            }
            TermError::DuplicateZIndex { index, first, second } => {
                write!(
                    f,
                    "Consensus index {index} is used by local positions {first} and {second}"
                )
            }

            // ---- Grounding ----
            TermError::ZIndexOutOfRange { position, index, len } => {
                write!(
                    f,
                    "Consensus index {index} at local position {position} is out of range for length {len}"
                )
            }
            TermError::MalformedGrounding { text } => {
                write!(f, "Malformed grounded term: {text}")
            }
            TermError::InvalidDistance { name } => {
                write!(f, "Invalid distance measure '{name}': expected 'linear' or 'squared'")
            }

            // ---- Constraints ----
            TermError::InfeasibleConstraint { constant } => {
                write!(f, "Constraint with zero coefficients is infeasible for constant {constant}")
            }

            // ---- Proximal solve ----
            TermError::NonFiniteSolution { term_id, index, value } => {
                write!(f, "Term {term_id}: proximal step produced {value} at index {index}")
            }

            // ---- Configuration ----
            TermError::InvalidConfig { text } => write!(f, "Invalid configuration: {text}"),

            // ---- Fallback minimizer ----
            TermError::Fallback(err) => write!(f, "Fallback minimizer failed: {err}"),
        }
    }
}

impl From<OptError> for TermError {
    fn from(err: OptError) -> Self {
        TermError::Fallback(err)
    }
}
