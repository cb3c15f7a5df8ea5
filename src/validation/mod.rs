// src/validation/mod.rs

//! Consistency checks for a register: amplitude count against live qubits,
//! and normalization.

use crate::core::{linalg, Result, SimError};
use crate::simulation::StateVec;
use num_complex::Complex64;

// Default tolerance (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// `true` if the summed squared magnitudes are within `tolerance` of 1.
pub fn is_normalized(amplitudes: &[Complex64], tolerance: f64) -> bool {
    let norm_sq: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
    (norm_sq - 1.0).abs() <= tolerance
}

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `amplitudes` - Flattened amplitudes to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::Unnormalized)` otherwise.
pub fn check_normalization(amplitudes: &[Complex64], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    if is_normalized(amplitudes, effective_tolerance) {
        Ok(())
    } else {
        let norm_sq = amplitudes.iter().map(|c| c.norm_sqr()).sum();
        Err(SimError::Unnormalized { norm_sq, tolerance: effective_tolerance })
    }
}

/// Checks that a flattened state holds exactly `2^num_qubits` amplitudes.
pub fn check_dimension(amplitudes: &[Complex64], num_qubits: usize) -> Result<()> {
    let expected = linalg::dimension(num_qubits)?;
    if amplitudes.len() != expected {
        return Err(SimError::DimensionMismatch { expected, actual: amplitudes.len() });
    }
    Ok(())
}

/// Runs every check against a live register.
pub fn validate_state(state: &StateVec, tolerance: Option<f64>) -> Result<()> {
    check_dimension(state.state_vector(), state.num_qubits())?;
    check_normalization(state.state_vector(), tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeId;

    #[test]
    fn test_check_normalization() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let good = [Complex64::new(h, 0.0), Complex64::new(0.0, h)];
        assert!(check_normalization(&good, None).is_ok());

        let bad = [Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
        match check_normalization(&bad, Some(1e-6)) {
            Err(SimError::Unnormalized { norm_sq, .. }) => assert!((norm_sq - 2.0).abs() < 1e-12),
            other => panic!("expected Unnormalized, got {:?}", other),
        }
    }

    #[test]
    fn test_check_dimension() {
        let amps = [Complex64::new(0.5, 0.0); 4];
        assert!(check_dimension(&amps, 2).is_ok());
        assert_eq!(check_dimension(&amps, 3), Err(SimError::DimensionMismatch { expected: 8, actual: 4 }));
    }

    #[test]
    fn test_validate_state_after_operations() -> Result<()> {
        let mut sv = StateVec::new(&[NodeId(0), NodeId(1), NodeId(2)])?;
        sv.entangle(NodeId(0), NodeId(2))?;
        sv.swap(NodeId(1), NodeId(2))?;
        validate_state(&sv, None)
    }
}
