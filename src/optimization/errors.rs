//! optimization::errors — unified error surface for the convex minimizer.
//!
//! Every fallible entry point in [`crate::optimization`] returns
//! [`OptResult<T>`]. Backend failures raised inside `argmin` are downcast
//! into dedicated variants so callers never match on raw `argmin` errors.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match point dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MinimizerOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// Starting point must be non-empty with finite coordinates.
    InvalidSeed {
        index: usize,
        value: f64,
    },

    /// Starting point has no coordinates.
    EmptySeed,

    /// Objective evaluation failed for a reason outside the optimizer.
    ObjectiveFailed {
        text: String,
    },

    // ---- Minimizer outcome ----
    /// Minimizer coordinates must be finite.
    InvalidMinimizer {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// The backend finished without reporting a best point.
    MissingMinimizer,

    /// The iteration cap was hit before any stopping tolerance was met.
    NotConverged {
        iterations: usize,
        grad_norm: Option<f64>,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MinimizerOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::InvalidSeed { index, value } => {
                write!(f, "Invalid starting point at index {index}: {value}, must be finite")
            }
            OptError::EmptySeed => {
                write!(f, "Starting point has no coordinates")
            }
            OptError::ObjectiveFailed { text } => {
                write!(f, "Objective evaluation failed: {text}")
            }

            // ---- Minimizer outcome ----
            OptError::InvalidMinimizer { index, value, reason } => {
                write!(f, "Invalid minimizer coordinate at index {index}: {value}: {reason}")
            }
            OptError::MissingMinimizer => {
                write!(f, "Missing minimizer (no best point reported)")
            }
            OptError::NotConverged { iterations, grad_norm } => match grad_norm {
                Some(n) => write!(
                    f,
                    "Minimizer did not converge after {iterations} iterations (||grad|| = {n})"
                ),
                None => write!(f, "Minimizer did not converge after {iterations} iterations"),
            },

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Objectives raise `OptError` through argmin's boxed error; recover it first.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Conversion of argmin errors into `OptError` variants.
    // - Recovery of an `OptError` that travelled through argmin's error type.
    //
    // They intentionally DO NOT cover:
    // - The `Display` text of every variant.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that a typed `ArgminError` maps onto its dedicated variant.
    //
    // Given
    // -----
    // - An `ArgminError::ConditionViolated` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Conversion yields `OptError::ConditionViolated` with the same text.
    fn from_argmin_error_maps_condition_violated() {
        // Arrange
        let err: Error = ArgminError::ConditionViolated { text: "wolfe".to_string() }.into();

        // Act
        let opt_err = OptError::from(err);

        // Assert
        assert_eq!(opt_err, OptError::ConditionViolated { text: "wolfe".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Verify that an `OptError` raised inside an objective and boxed by argmin
    // is recovered unchanged rather than flattened into `BackendError`.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Conversion back yields the original `NonFiniteCost` variant.
    fn from_argmin_error_recovers_wrapped_opt_error() {
        // Arrange
        let err: Error = OptError::NonFiniteCost { value: f64::INFINITY }.into();

        // Act
        let opt_err = OptError::from(err);

        // Assert
        assert_eq!(opt_err, OptError::NonFiniteCost { value: f64::INFINITY });
    }
}
