//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Label of a qubit (graph node) chosen by the pattern executor.
/// Labels are stable for the lifetime of the qubit; the tensor axis that
/// holds the qubit is not, and is looked up through the session's node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Failures surfaced by the state-vector simulator.
///
/// Every failing call leaves the state untouched: validation happens before
/// the amplitude buffer or the node index is mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The label was never prepared, or has already been measured.
    #[error("Node not found: {node} is not a live qubit")]
    NodeNotFound {
        /// Missing label
        node: NodeId,
    },

    /// The label is already live in the state vector.
    #[error("Duplicate node: {node} is already prepared")]
    DuplicateNode {
        /// Offending label
        node: NodeId,
    },

    /// Normalization was requested on a tensor whose norm is numerically zero.
    #[error("Degenerate norm: cannot normalize a state with norm {norm:.3e}")]
    DegenerateNorm {
        /// Norm that triggered the failure
        norm: f64,
    },

    /// A state that must be normalized is not.
    #[error("State not normalized: sum of |c_i|^2 = {norm_sq} (tolerance {tolerance})")]
    Unnormalized {
        /// Observed squared norm
        norm_sq: f64,
        /// Allowed deviation from 1
        tolerance: f64,
    },

    /// The requested operation is inconsistent with the current state.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Failure message
        message: String,
    },

    /// An operator or state does not have the expected number of entries.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A contraction referenced an axis the tensor does not have.
    #[error("Axis {axis} out of range for a rank-{rank} tensor")]
    AxisOutOfRange {
        /// Requested axis
        axis: usize,
        /// Rank of the tensor
        rank: usize,
    },

    /// Clifford frame index outside the 24-element table.
    #[error("Invalid Clifford index {index}: expected a value in 0..24")]
    InvalidClifford {
        /// Supplied index
        index: usize,
    },

    /// A signal domain points past the end of the outcome record.
    #[error("Outcome {index} not recorded yet (record holds {recorded} outcomes)")]
    OutcomeNotRecorded {
        /// Requested record index
        index: usize,
        /// Current record length
        recorded: usize,
    },
}
