// src/simulation/statevec.rs

use crate::core::constants::sim_constants::NORM_TOLERANCE;
use crate::core::tensor::plus;
use crate::core::{linalg, AmplitudeTensor, Matrix2, NodeId, NodeIndex, Result, SimError};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;
use tracing::{debug, trace};

/// Controlled-Z as a row-major 4x4 operator, `(control, target)` axis order.
const CZ_TENSOR: [Complex64; 16] = {
    const O: Complex64 = Complex64::new(1.0, 0.0);
    const Z: Complex64 = Complex64::new(0.0, 0.0);
    const M: Complex64 = Complex64::new(-1.0, 0.0);
    [
        O, Z, Z, Z,
        Z, O, Z, Z,
        Z, Z, O, Z,
        Z, Z, Z, M,
    ]
};

/// SWAP as a row-major 4x4 operator.
const SWAP_TENSOR: [Complex64; 16] = {
    const O: Complex64 = Complex64::new(1.0, 0.0);
    const Z: Complex64 = Complex64::new(0.0, 0.0);
    [
        O, Z, Z, Z,
        Z, Z, O, Z,
        Z, O, Z, Z,
        Z, Z, Z, O,
    ]
};

/// The evolving state of an MBQC register.
///
/// Owns the dense amplitude tensor (one axis per live qubit) and the node
/// index mapping executor labels to axes. Every operation either completes
/// and leaves the pair consistent, or fails without touching either.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVec {
    pub(crate) psi: AmplitudeTensor,
    pub(crate) node_index: NodeIndex,
    pub(crate) tolerance: f64,
}

impl StateVec {
    /// A register holding `input_nodes` in |+>^⊗n, axes in the given order.
    pub fn new(input_nodes: &[NodeId]) -> Result<Self> {
        Self::with_tolerance(input_nodes, NORM_TOLERANCE)
    }

    /// As [`StateVec::new`], treating norms below `tolerance` as zero.
    pub fn with_tolerance(input_nodes: &[NodeId], tolerance: f64) -> Result<Self> {
        let node_index = NodeIndex::from_nodes(input_nodes)?;
        let psi = AmplitudeTensor::plus_state(input_nodes.len())?;
        Ok(Self { psi, node_index, tolerance })
    }

    pub fn norm(&self) -> f64 {
        self.psi.norm()
    }

    pub fn num_qubits(&self) -> usize {
        self.node_index.len()
    }

    /// Live labels in axis order.
    pub fn node_index(&self) -> &[NodeId] {
        self.node_index.nodes()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.node_index.contains(node)
    }

    pub fn axis_of(&self, node: NodeId) -> Result<usize> {
        self.node_index.axis_of(node)
    }

    /// Flattened amplitudes; the first live node is the most significant bit.
    pub fn state_vector(&self) -> &[Complex64] {
        self.psi.amplitudes()
    }

    pub fn tensor(&self) -> &AmplitudeTensor {
        &self.psi
    }

    /// Component-wise comparison with a flattened amplitude vector.
    pub fn approx_eq(&self, other: &[Complex64], tolerance: f64) -> bool {
        let own = self.psi.amplitudes();
        own.len() == other.len() && own.iter().zip(other).all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Appends `node` in |+> as the new last axis.
    pub fn prepare(&mut self, node: NodeId) -> Result<()> {
        self.prepare_state(node, plus())
    }

    /// Appends `node` in the given single-qubit state (normalized on the way in).
    pub fn prepare_state(&mut self, node: NodeId, state: [Complex64; 2]) -> Result<()> {
        if self.node_index.contains(node) {
            return Err(SimError::DuplicateNode { node });
        }
        let mut state = state;
        linalg::normalize(&mut state, self.tolerance)?;
        self.psi.tensor(&state)?;
        let axis = self.node_index.push(node)?;
        debug!(%node, axis, qubits = self.num_qubits(), "prepared qubit");
        trace!(state = %self.psi, "state after preparation");
        Ok(())
    }

    /// Applies CZ between two live nodes. CZ is symmetric, so the order of
    /// the two labels does not affect the result.
    pub fn entangle(&mut self, control: NodeId, target: NodeId) -> Result<()> {
        let axes = self.pair_axes(control, target)?;
        self.psi.apply(&CZ_TENSOR, &axes)?;
        debug!(%control, %target, ?axes, "entangled");
        trace!(state = %self.psi, "state after CZ");
        Ok(())
    }

    /// Exchanges the states held by two live nodes.
    ///
    /// Both labels are resolved through the node index, exactly as in
    /// [`StateVec::entangle`]. The index itself is unchanged: afterwards `a`
    /// carries what `b` carried and vice versa.
    pub fn swap(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let axes = self.pair_axes(a, b)?;
        self.psi.apply(&SWAP_TENSOR, &axes)?;
        debug!(%a, %b, ?axes, "swapped");
        trace!(state = %self.psi, "state after SWAP");
        Ok(())
    }

    /// Applies an arbitrary 2x2 operator to a live node.
    pub fn evolve_single(&mut self, op: &Matrix2, node: NodeId) -> Result<()> {
        let axis = self.node_index.axis_of(node)?;
        self.psi.apply_single(op, axis)
    }

    /// Applies a row-major `2^k x 2^k` operator to `k` live nodes, with
    /// `nodes[0]` as the most significant operator index.
    pub fn evolve(&mut self, op: &[Complex64], nodes: &[NodeId]) -> Result<()> {
        let axes = nodes
            .iter()
            .map(|&node| self.node_index.axis_of(node))
            .collect::<Result<Vec<_>>>()?;
        self.psi.apply(op, &axes)
    }

    /// `<psi|op|psi>` for a single-node operator on the normalized state.
    pub fn expectation_single(&self, op: &Matrix2, node: NodeId) -> Result<Complex64> {
        let axis = self.node_index.axis_of(node)?;
        self.psi.expectation(op, axis, self.tolerance)
    }

    /// Removes a node whose qubit has already been projected onto a basis
    /// state, renormalizing the rest of the register.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        let axis = self.node_index.axis_of(node)?;
        let branch = self.psi.remove_axis(axis, self.tolerance)?;
        if branch == 1 {
            debug!(%node, axis, "index-0 branch vanished, kept index-1 slice");
        }
        self.node_index.remove(node)?;
        Ok(())
    }

    fn pair_axes(&self, a: NodeId, b: NodeId) -> Result<[usize; 2]> {
        if a == b {
            return Err(SimError::InvalidOperation {
                message: format!("two-qubit operation needs distinct nodes, got {} twice", a),
            });
        }
        Ok([self.node_index.axis_of(a)?, self.node_index.axis_of(b)?])
    }
}

impl Default for StateVec {
    fn default() -> Self {
        Self { psi: AmplitudeTensor::scalar(), node_index: NodeIndex::new(), tolerance: NORM_TOLERANCE }
    }
}

impl fmt::Display for StateVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVec{:?}: {}", self.node_index.nodes().iter().map(|n| n.0).collect::<Vec<_>>(), self.psi)
    }
}

/// The single-qubit |0> and |1> amplitude pairs, indexed by bit value.
pub fn basis_state(bit: u8) -> [Complex64; 2] {
    if bit == 0 {
        [Complex64::one(), Complex64::zero()]
    } else {
        [Complex64::zero(), Complex64::one()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::sim_constants::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-10;

    fn nid(id: u64) -> NodeId {
        NodeId(id)
    }

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_new_is_plus_product() -> Result<()> {
        let sv = StateVec::new(&[nid(0), nid(1)])?;
        assert!(sv.approx_eq(&[c(0.5); 4], TEST_TOLERANCE));
        assert_eq!(sv.node_index(), &[nid(0), nid(1)]);

        let empty = StateVec::new(&[])?;
        assert_eq!(empty.state_vector(), &[Complex64::one()]);
        assert_eq!(empty, StateVec::default());
        Ok(())
    }

    #[test]
    fn test_prepare_rejects_duplicate_without_mutation() -> Result<()> {
        let mut sv = StateVec::default();
        sv.prepare(nid(3))?;
        let before = sv.clone();
        assert_eq!(sv.prepare(nid(3)), Err(SimError::DuplicateNode { node: nid(3) }));
        assert_eq!(sv, before);
        Ok(())
    }

    #[test]
    fn test_entangle_two_plus_states() -> Result<()> {
        let mut sv = StateVec::default();
        sv.prepare(nid(0))?;
        sv.prepare(nid(1))?;
        sv.entangle(nid(0), nid(1))?;
        assert!(sv.approx_eq(&[c(0.5), c(0.5), c(0.5), c(-0.5)], TEST_TOLERANCE));
        assert!((sv.norm() - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_entangle_unknown_or_same_node() -> Result<()> {
        let mut sv = StateVec::new(&[nid(0)])?;
        assert_eq!(sv.entangle(nid(0), nid(5)), Err(SimError::NodeNotFound { node: nid(5) }));
        assert!(matches!(sv.entangle(nid(0), nid(0)), Err(SimError::InvalidOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_swap_is_label_based() -> Result<()> {
        // Axis order [0, 1] is deliberately not the label order used in swap.
        let mut sv = StateVec::default();
        sv.prepare_state(nid(10), basis_state(1))?;
        sv.prepare_state(nid(20), basis_state(0))?;
        sv.prepare_state(nid(30), basis_state(0))?;
        // |100> -> swap(30, 10) -> |001>
        sv.swap(nid(30), nid(10))?;
        let mut expected = vec![c(0.0); 8];
        expected[1] = c(1.0);
        assert!(sv.approx_eq(&expected, TEST_TOLERANCE));
        assert_eq!(sv.node_index(), &[nid(10), nid(20), nid(30)]);
        Ok(())
    }

    #[test]
    fn test_remove_after_projection() -> Result<()> {
        let mut sv = StateVec::default();
        sv.prepare_state(nid(0), basis_state(1))?;
        sv.prepare(nid(1))?;
        assert!(sv.contains(nid(0)));
        sv.remove(nid(0))?;
        assert!(!sv.contains(nid(0)));
        assert!(sv.contains(nid(1)));
        assert_eq!(sv.num_qubits(), 1);
        assert!(sv.approx_eq(&[c(FRAC_1_SQRT_2), c(FRAC_1_SQRT_2)], TEST_TOLERANCE));
        assert_eq!(sv.axis_of(nid(1))?, 0);
        assert_eq!(sv.remove(nid(0)), Err(SimError::NodeNotFound { node: nid(0) }));
        Ok(())
    }

    #[test]
    fn test_evolve_matches_entangle() -> Result<()> {
        let mut a = StateVec::new(&[nid(0), nid(1), nid(2)])?;
        let mut b = a.clone();
        a.entangle(nid(2), nid(0))?;
        b.evolve(&CZ_TENSOR, &[nid(2), nid(0)])?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_new_rejects_unaddressable_register() {
        let labels: Vec<NodeId> = (0..64).map(nid).collect();
        assert!(matches!(StateVec::new(&labels), Err(SimError::InvalidOperation { .. })));
    }

    #[test]
    fn test_prepare_state_rejects_zero_vector() {
        let mut sv = StateVec::default();
        let res = sv.prepare_state(nid(0), [Complex64::zero(); 2]);
        assert!(matches!(res, Err(SimError::DegenerateNorm { .. })));
        assert_eq!(sv.num_qubits(), 0);
    }
}
