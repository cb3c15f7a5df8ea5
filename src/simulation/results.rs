// src/simulation/results.rs
use crate::core::NodeId;
use num_complex::Complex64;
use std::fmt;

/// Outcome record and final register of a [`Simulator`](super::Simulator) run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Measurement outcomes in measurement order.
    outcomes: Vec<u8>,
    /// Labels still live at the end, in axis order.
    nodes: Vec<NodeId>,
    /// Flattened amplitudes of the live register.
    state: Vec<Complex64>,
}

impl SimulationResult {
    pub(crate) fn new(outcomes: Vec<u8>, nodes: Vec<NodeId>, state: Vec<Complex64>) -> Self {
        Self { outcomes, nodes, state }
    }

    pub fn outcomes(&self) -> &[u8] {
        &self.outcomes
    }

    /// The `index`-th recorded outcome, if that many measurements happened.
    pub fn outcome(&self, index: usize) -> Option<u8> {
        self.outcomes.get(index).copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn state(&self) -> &[Complex64] {
        &self.state
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No measurements were made.")?;
        } else {
            let bits: String = self.outcomes.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect();
            writeln!(f, "  Outcomes: {}", bits)?;
        }
        if self.nodes.is_empty() {
            writeln!(f, "  No live nodes remain.")?;
        } else {
            writeln!(f, "  Live nodes:")?;
            for node in &self.nodes {
                writeln!(f, "    {}", node)?;
            }
            write!(f, "  State: [")?;
            for (i, c) in self.state.iter().enumerate() {
                write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
