// src/simulation/correction.rs

use super::measure::signal_parity;
use super::statevec::StateVec;
use crate::core::{NodeId, Result};
use crate::operations::CorrectionKind;
use tracing::debug;

impl StateVec {
    /// Applies the Pauli byproduct `kind` to `node` when the parity of
    /// `outcomes` over `domain` is odd. Consumes no randomness.
    ///
    /// Returns whether the operator was applied. The node must be live even
    /// when the parity is even.
    pub fn apply_correction(
        &mut self,
        kind: CorrectionKind,
        node: NodeId,
        domain: &[usize],
        outcomes: &[u8],
    ) -> Result<bool> {
        let axis = self.node_index.axis_of(node)?;
        if !signal_parity(outcomes, domain)? {
            debug!(?kind, %node, "correction skipped, even parity");
            return Ok(false);
        }
        self.psi.apply_single(&kind.matrix(), axis)?;
        debug!(?kind, %node, axis, "correction applied");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimError;
    use num_complex::Complex64;

    fn nid(id: u64) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn test_even_parity_is_noop() -> Result<()> {
        let mut sv = StateVec::new(&[nid(0), nid(1)])?;
        sv.entangle(nid(0), nid(1))?;
        let before = sv.clone();
        assert!(!sv.apply_correction(CorrectionKind::PauliX, nid(1), &[0, 1], &[1, 1])?);
        assert!(!sv.apply_correction(CorrectionKind::PauliZ, nid(1), &[], &[])?);
        assert_eq!(sv, before);
        Ok(())
    }

    #[test]
    fn test_odd_parity_applies_pauli() -> Result<()> {
        // Z on |+> gives |->.
        let mut sv = StateVec::new(&[nid(0)])?;
        assert!(sv.apply_correction(CorrectionKind::PauliZ, nid(0), &[0], &[1])?);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(sv.approx_eq(&[Complex64::new(h, 0.0), Complex64::new(-h, 0.0)], 1e-12));
        Ok(())
    }

    #[test]
    fn test_correction_requires_live_node() {
        let mut sv = StateVec::default();
        assert_eq!(
            sv.apply_correction(CorrectionKind::PauliX, nid(2), &[], &[]),
            Err(SimError::NodeNotFound { node: nid(2) })
        );
    }
}
