// src/simulation/mod.rs

//! State-vector simulation of MBQC commands.
//!
//! [`StateVec`] is the register itself: preparation, entanglement, swap,
//! adaptive measurement and Pauli correction, each taking its parameters
//! explicitly. [`Simulator`] is a thin session around it that owns the
//! seeded RNG and the outcome record, and applies commands in the order it
//! is given them.

mod config;
mod correction;
mod measure;
mod results;
mod statevec;

pub use config::SimulatorConfig;
pub use measure::signal_parity;
pub use results::SimulationResult;
pub use statevec::{basis_state, StateVec};

use crate::core::{NodeId, Result};
use crate::operations::{Command, CorrectionKind};
use rand::rngs::StdRng;
use tracing::info;

/// A single sequential simulation session.
#[derive(Debug)]
pub struct Simulator {
    state: StateVec,
    rng: StdRng,
    outcomes: Vec<u8>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_config(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Creates a session with an empty register and an OS-seeded RNG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with an empty register.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let state = StateVec {
            tolerance: config.norm_tolerance,
            ..StateVec::default()
        };
        Self { state, rng: config.build_rng(), outcomes: Vec::new() }
    }

    /// Creates a session whose register starts with `input_nodes` in |+>.
    pub fn with_input_nodes(input_nodes: &[NodeId], config: SimulatorConfig) -> Result<Self> {
        let state = StateVec::with_tolerance(input_nodes, config.norm_tolerance)?;
        Ok(Self { state, rng: config.build_rng(), outcomes: Vec::new() })
    }

    pub fn state(&self) -> &StateVec {
        &self.state
    }

    /// Outcomes recorded so far, in measurement order.
    pub fn outcomes(&self) -> &[u8] {
        &self.outcomes
    }

    /// Applies one command. Measurement outcomes are appended to the record
    /// and returned.
    pub fn apply(&mut self, command: &Command) -> Result<Option<u8>> {
        match command {
            Command::N { node } => self.state.prepare(*node)?,
            Command::E { nodes } => self.state.entangle(nodes.0, nodes.1)?,
            Command::Swap { nodes } => self.state.swap(nodes.0, nodes.1)?,
            Command::M { node, plane, angle, s_domain, t_domain, vop } => {
                let outcome = self.state.measure(
                    *node,
                    *plane,
                    *angle,
                    s_domain,
                    t_domain,
                    &self.outcomes,
                    *vop,
                    &mut self.rng,
                )?;
                self.outcomes.push(outcome);
                return Ok(Some(outcome));
            }
            Command::X { node, domain } => {
                self.state.apply_correction(CorrectionKind::PauliX, *node, domain, &self.outcomes)?;
            }
            Command::Z { node, domain } => {
                self.state.apply_correction(CorrectionKind::PauliZ, *node, domain, &self.outcomes)?;
            }
        }
        Ok(None)
    }

    /// Applies `commands` in order and returns the outcome record and the
    /// final register. Stops at the first failing command; everything
    /// applied before it stays applied.
    pub fn run(&mut self, commands: &[Command]) -> Result<SimulationResult> {
        for command in commands {
            self.apply(command)?;
        }
        info!(
            commands = commands.len(),
            measurements = self.outcomes.len(),
            live = self.state.num_qubits(),
            "command sequence finished"
        );
        Ok(SimulationResult::new(
            self.outcomes.clone(),
            self.state.node_index().to_vec(),
            self.state.state_vector().to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clifford::Clifford;
    use crate::operations::Plane;
    use num_complex::Complex64;

    const TEST_TOLERANCE: f64 = 1e-10;

    fn nid(id: u64) -> NodeId {
        NodeId(id)
    }

    fn assert_complex_vec_approx_equal(actual: &[Complex64], expected: &[Complex64], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).norm_sqr() < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, a, e, context
            );
        }
    }

    #[test]
    fn test_empty_run() -> Result<()> {
        let mut sim = Simulator::with_config(SimulatorConfig::seeded(1));
        let result = sim.run(&[])?;
        assert!(result.outcomes().is_empty());
        assert_eq!(result.state(), &[Complex64::new(1.0, 0.0)]);
        Ok(())
    }

    #[test]
    fn test_teleport_with_corrections_is_deterministic() -> Result<()> {
        // Two-node wire: measuring node 0 in X and applying X^{s0} to node 1
        // always leaves node 1 in H|+> = |0>.
        let pattern = vec![
            Command::N { node: nid(0) },
            Command::N { node: nid(1) },
            Command::E { nodes: (nid(0), nid(1)) },
            Command::measure(nid(0), Plane::XY, 0.0),
            Command::X { node: nid(1), domain: vec![0] },
        ];
        for seed in 0..16 {
            let mut sim = Simulator::with_config(SimulatorConfig::seeded(seed));
            let result = sim.run(&pattern)?;
            assert_eq!(result.outcomes().len(), 1);
            assert_eq!(result.nodes(), &[nid(1)]);
            assert_complex_vec_approx_equal(
                result.state(),
                &[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                "corrected wire output",
            );
        }
        Ok(())
    }

    #[test]
    fn test_same_seed_same_outcomes() -> Result<()> {
        let mut pattern: Vec<Command> = (0..4).map(|i| Command::N { node: nid(i) }).collect();
        pattern.extend((0..3).map(|i| Command::E { nodes: (nid(i), nid(i + 1)) }));
        pattern.push(Command::measure(nid(0), Plane::XY, 0.25));
        pattern.push(Command::M {
            node: nid(1),
            plane: Plane::XY,
            angle: 0.5,
            s_domain: vec![0],
            t_domain: vec![],
            vop: Clifford::IDENTITY,
        });
        pattern.push(Command::M {
            node: nid(2),
            plane: Plane::YZ,
            angle: 0.1,
            s_domain: vec![1],
            t_domain: vec![0],
            vop: Clifford::S,
        });

        let first = Simulator::with_config(SimulatorConfig::seeded(2024)).run(&pattern)?;
        let second = Simulator::with_config(SimulatorConfig::seeded(2024)).run(&pattern)?;
        assert_eq!(first, second);
        assert_eq!(first.outcomes().len(), 3);
        Ok(())
    }

    #[test]
    fn test_input_nodes_and_failure_stops_run() {
        let mut sim = Simulator::with_input_nodes(&[nid(5)], SimulatorConfig::seeded(0)).unwrap();
        let err = sim.run(&[Command::N { node: nid(6) }, Command::N { node: nid(5) }]);
        assert_eq!(err, Err(crate::core::SimError::DuplicateNode { node: nid(5) }));
        assert_eq!(sim.state().node_index(), &[nid(5), nid(6)]);
    }
}
