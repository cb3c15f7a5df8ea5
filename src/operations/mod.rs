// src/operations/mod.rs

//! Commands a pattern executor issues against the simulator, and the
//! measurement-plane algebra they carry.
//!
//! The simulator never reorders or validates a command sequence as a whole;
//! each command is checked only against the live state when it is applied.

mod plane;

pub use plane::{measurement_operator, MeasureUpdate, Plane};

use crate::clifford::Clifford;
use crate::core::{Matrix2, NodeId};
use std::fmt;

/// Pauli byproduct applied by a correction command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorrectionKind {
    PauliX,
    PauliZ,
}

impl CorrectionKind {
    pub fn matrix(self) -> Matrix2 {
        match self {
            CorrectionKind::PauliX => *Clifford::X.matrix(),
            CorrectionKind::PauliZ => *Clifford::Z.matrix(),
        }
    }
}

/// A single MBQC command.
///
/// Domains are indices into the outcome record (measurement order), not node
/// labels. Angles are in units of π.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Prepare `node` in |+>.
    N { node: NodeId },
    /// Controlled-Z between two live nodes.
    E { nodes: (NodeId, NodeId) },
    /// Exchange the states held by two live nodes.
    Swap { nodes: (NodeId, NodeId) },
    /// Adaptive single-qubit measurement; consumes the node.
    M {
        node: NodeId,
        plane: Plane,
        angle: f64,
        s_domain: Vec<usize>,
        t_domain: Vec<usize>,
        vop: Clifford,
    },
    /// X byproduct on `node` if the domain parity is odd.
    X { node: NodeId, domain: Vec<usize> },
    /// Z byproduct on `node` if the domain parity is odd.
    Z { node: NodeId, domain: Vec<usize> },
}

impl Command {
    /// Measurement in `plane` at `angle` with no signal dependencies and the identity frame.
    pub fn measure(node: NodeId, plane: Plane, angle: f64) -> Self {
        Command::M { node, plane, angle, s_domain: Vec::new(), t_domain: Vec::new(), vop: Clifford::IDENTITY }
    }

    /// All node labels referenced by this command.
    pub fn involved_nodes(&self) -> Vec<NodeId> {
        match self {
            Command::N { node } => vec![*node],
            Command::E { nodes } | Command::Swap { nodes } => vec![nodes.0, nodes.1],
            Command::M { node, .. } => vec![*node],
            Command::X { node, .. } | Command::Z { node, .. } => vec![*node],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::N { node } => write!(f, "N({})", node),
            Command::E { nodes } => write!(f, "E({}, {})", nodes.0, nodes.1),
            Command::Swap { nodes } => write!(f, "SWAP({}, {})", nodes.0, nodes.1),
            Command::M { node, plane, angle, s_domain, t_domain, vop } => write!(
                f,
                "M({}, {}, {}π, s={:?}, t={:?}, {})",
                node, plane, angle, s_domain, t_domain, vop
            ),
            Command::X { node, domain } => write!(f, "X({}, {:?})", node, domain),
            Command::Z { node, domain } => write!(f, "Z({}, {:?})", node, domain),
        }
    }
}
