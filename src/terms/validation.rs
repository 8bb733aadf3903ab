//! Term validation helpers — construction and update checks for local blocks.
//!
//! Purpose
//! -------
//! Centralize the small checks every term constructor and consensus/dual
//! update runs, so invalid inputs are rejected with a structured
//! [`TermError`] before any block state is built or overwritten.
//!
//! Key behaviors
//! -------------
//! - Validate block arity, step size (ρ) and soft-rule weights.
//! - Validate coefficient vectors, threshold constants, and arbitrary local
//!   vectors for finiteness and length.
//! - Reject consensus index maps that alias two local variables onto the same
//!   global slot.
//!
//! Conventions
//! -----------
//! - Indices reported in errors are 0-based positions in the local block.
//! - Helpers never panic on invalid inputs and never log; callers decide what
//!   to trace.
use crate::terms::errors::{TermError, TermResult};
use ndarray::ArrayView1;
use std::collections::HashMap;

/// Reject empty blocks.
pub fn validate_arity(arity: usize) -> TermResult<()> {
    if arity == 0 {
        return Err(TermError::EmptyBlock);
    }
    Ok(())
}

/// Check that a vector labelled `what` has exactly `expected` entries.
pub fn validate_len(what: &'static str, expected: usize, found: usize) -> TermResult<()> {
    if expected != found {
        return Err(TermError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}

/// Validate the ADMM step size ρ.
///
/// # Errors
/// - [`TermError::InvalidStepSize`] if `rho` is non-finite or `<= 0`.
pub fn validate_step_size(rho: f64) -> TermResult<()> {
    if !rho.is_finite() || rho <= 0.0 {
        return Err(TermError::InvalidStepSize { value: rho });
    }
    Ok(())
}

/// Validate a block weight.
///
/// `+∞` is accepted here because hard rules carry it into their block; the
/// hinge constructors reject it separately via [`validate_soft_weight`].
///
/// # Errors
/// - [`TermError::InvalidWeight`] if `weight` is NaN or negative.
pub fn validate_weight(weight: f64) -> TermResult<()> {
    if weight.is_nan() {
        return Err(TermError::InvalidWeight { value: weight, reason: "Weight must not be NaN." });
    }
    if weight < 0.0 {
        return Err(TermError::InvalidWeight {
            value: weight,
            reason: "Weight must be non-negative.",
        });
    }
    Ok(())
}

/// Validate a soft-rule weight: finite and non-negative.
pub fn validate_soft_weight(weight: f64) -> TermResult<()> {
    validate_weight(weight)?;
    if !weight.is_finite() {
        return Err(TermError::InvalidWeight {
            value: weight,
            reason: "Soft-rule weight must be finite; hard rules use a linear constraint.",
        });
    }
    Ok(())
}

/// Reject soft weights whose squared-hinge terms overflow.
///
/// The active-hinge system uses `2w·‖c‖²` on its diagonal and `2w·k·c` on its
/// right-hand side; both must be finite.
pub fn validate_squared_hinge_scale(
    weight: f64, coefficients: ArrayView1<'_, f64>, constant: f64,
) -> TermResult<()> {
    let two_w = 2.0 * weight;
    let c_max = coefficients.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    let curvature = two_w * coefficients.dot(&coefficients);
    let forcing = two_w * constant.abs() * c_max;
    if !curvature.is_finite() || !forcing.is_finite() {
        return Err(TermError::InvalidWeight {
            value: weight,
            reason: "Weight is too large: 2w·‖c‖² or 2w·|k|·|c| overflows.",
        });
    }
    Ok(())
}

/// Reject soft weights whose linear-hinge shift `(w/ρ)·c` overflows.
pub fn validate_linear_hinge_scale(
    weight: f64, coefficients: ArrayView1<'_, f64>, step_size: f64,
) -> TermResult<()> {
    let c_max = coefficients.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if !(weight / step_size * c_max).is_finite() {
        return Err(TermError::InvalidWeight {
            value: weight,
            reason: "Weight is too large: (w/ρ)·|c| overflows.",
        });
    }
    Ok(())
}

/// Check a freshly solved local primal before it is stored.
pub fn validate_solution(term_id: u64, x: ArrayView1<'_, f64>) -> TermResult<()> {
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(TermError::NonFiniteSolution { term_id, index, value });
        }
    }
    Ok(())
}

/// Validate that every coefficient is finite.
pub fn validate_coefficients(coefficients: ArrayView1<'_, f64>) -> TermResult<()> {
    for (index, &value) in coefficients.iter().enumerate() {
        if !value.is_finite() {
            return Err(TermError::InvalidCoefficient { index, value });
        }
    }
    Ok(())
}

/// Validate that the threshold constant is finite.
pub fn validate_constant(constant: f64) -> TermResult<()> {
    if !constant.is_finite() {
        return Err(TermError::InvalidConstant { value: constant });
    }
    Ok(())
}

/// Validate a local vector labelled `what`: length `expected` and all finite.
pub fn validate_local_vector(
    what: &'static str, values: ArrayView1<'_, f64>, expected: usize,
) -> TermResult<()> {
    validate_len(what, expected, values.len())?;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(TermError::NonFiniteInput { what, index, value });
        }
    }
    Ok(())
}

/// Validate the local-to-global consensus index map.
///
/// # Errors
/// - [`TermError::DimensionMismatch`] if `z_indices.len() != arity`.
/// - [`TermError::DuplicateZIndex`] if two positions map to the same global
///   index.
pub fn validate_z_indices(z_indices: &[usize], arity: usize) -> TermResult<()> {
    validate_len("z_indices", arity, z_indices.len())?;
    let mut seen: HashMap<usize, usize> = HashMap::with_capacity(z_indices.len());
    for (position, &index) in z_indices.iter().enumerate() {
        if let Some(&first) = seen.get(&index) {
            return Err(TermError::DuplicateZIndex { index, first, second: position });
        }
        seen.insert(index, position);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance and rejection boundaries of each validation helper.
    //
    // They intentionally DO NOT cover:
    // - Block construction as a whole (see `block`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the step-size boundary: strictly positive and finite only.
    //
    // Given
    // -----
    // - ρ in {1e-12, 0, -1, ∞, NaN}.
    //
    // Expect
    // ------
    // - Only `1e-12` is accepted.
    fn validate_step_size_requires_positive_finite() {
        // Act / Assert
        assert!(validate_step_size(1e-12).is_ok());
        for rho in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            assert!(matches!(validate_step_size(rho), Err(TermError::InvalidStepSize { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // Distinguish block weights (which may be +∞) from soft-rule weights.
    //
    // Given
    // -----
    // - Weights 0, 2.5, +∞, -1 and NaN.
    //
    // Expect
    // ------
    // - `validate_weight` accepts 0, 2.5 and +∞.
    // - `validate_soft_weight` accepts only 0 and 2.5.
    fn validate_weight_and_soft_weight_boundaries() {
        // Act / Assert
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(2.5).is_ok());
        assert!(validate_weight(f64::INFINITY).is_ok());
        assert!(validate_weight(-1.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());

        assert!(validate_soft_weight(0.0).is_ok());
        assert!(validate_soft_weight(2.5).is_ok());
        assert!(matches!(
            validate_soft_weight(f64::INFINITY),
            Err(TermError::InvalidWeight { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-finite coefficients are reported with their position.
    //
    // Given
    // -----
    // - Coefficients `[1, NaN, 2]`.
    //
    // Expect
    // ------
    // - `InvalidCoefficient { index: 1, .. }`.
    fn validate_coefficients_reports_index() {
        // Arrange
        let c = array![1.0, f64::NAN, 2.0];

        // Act
        let result = validate_coefficients(c.view());

        // Assert
        assert!(matches!(result, Err(TermError::InvalidCoefficient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify that local vectors are checked for both length and finiteness.
    //
    // Given
    // -----
    // - A length-2 vector checked against arity 3.
    // - A length-2 vector with an infinite entry checked against arity 2.
    //
    // Expect
    // ------
    // - `DimensionMismatch` and `NonFiniteInput` respectively.
    fn validate_local_vector_checks_len_and_finiteness() {
        // Arrange
        let short = array![0.0, 1.0];
        let bad = array![0.0, f64::INFINITY];

        // Act
        let r_len = validate_local_vector("consensus", short.view(), 3);
        let r_fin = validate_local_vector("consensus", bad.view(), 2);

        // Assert
        assert_eq!(
            r_len,
            Err(TermError::DimensionMismatch { what: "consensus", expected: 3, found: 2 })
        );
        assert!(matches!(
            r_fin,
            Err(TermError::NonFiniteInput { what: "consensus", index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure aliased consensus slots are rejected.
    //
    // Given
    // -----
    // - `z_indices = [4, 7, 4]` for an arity-3 block.
    //
    // Expect
    // ------
    // - `DuplicateZIndex { index: 4, first: 0, second: 2 }`.
    fn validate_z_indices_rejects_duplicates() {
        // Act
        let result = validate_z_indices(&[4, 7, 4], 3);

        // Assert
        assert_eq!(result, Err(TermError::DuplicateZIndex { index: 4, first: 0, second: 2 }));
        assert!(validate_z_indices(&[4, 7, 9], 3).is_ok());
        assert!(validate_arity(0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Ensure weights that are finite but large enough to overflow the hinge
    // arithmetic are rejected.
    //
    // Given
    // -----
    // - `w = f64::MAX` with `c = [1]`, and `w = 1e300` with `c = [1e10]`.
    // - `w = 1e300`, `c = [1]`, `k = 1e10` (right-hand side overflow only).
    // - A moderate `w = 1e6`.
    //
    // Expect
    // ------
    // - `InvalidWeight` for the first three; the moderate weight passes both
    //   scale checks.
    fn hinge_scale_checks_reject_overflowing_weights() {
        // Arrange
        let one = array![1.0];
        let big = array![1e10];

        // Act / Assert
        assert!(matches!(
            validate_squared_hinge_scale(f64::MAX, one.view(), 0.0),
            Err(TermError::InvalidWeight { .. })
        ));
        assert!(validate_squared_hinge_scale(1e300, big.view(), 0.0).is_err());
        assert!(validate_squared_hinge_scale(1e300, one.view(), 1e10).is_err());
        assert!(matches!(
            validate_linear_hinge_scale(f64::MAX, one.view(), 1e-3),
            Err(TermError::InvalidWeight { .. })
        ));
        assert!(validate_squared_hinge_scale(1e6, one.view(), 2.0).is_ok());
        assert!(validate_linear_hinge_scale(1e6, one.view(), 1.0).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify non-finite solutions are reported with their position.
    //
    // Given
    // -----
    // - `x = [0.5, +∞]` for term 12.
    //
    // Expect
    // ------
    // - `NonFiniteSolution { term_id: 12, index: 1, .. }`.
    fn validate_solution_reports_index() {
        // Arrange
        let x = array![0.5, f64::INFINITY];

        // Act
        let result = validate_solution(12, x.view());

        // Assert
        assert!(matches!(result, Err(TermError::NonFiniteSolution { term_id: 12, index: 1, .. })));
        assert!(validate_solution(12, array![0.5, 1.0].view()).is_ok());
    }
}
