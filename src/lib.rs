// src/lib.rs

//! `mbqsim` - State-vector simulation of measurement-based quantum computation
//!
//! The crate owns the dense amplitude tensor of a qubit register and the
//! operations an MBQC pattern executor drives it with: qubit preparation,
//! CZ entanglement, swap, adaptive single-qubit measurement and Pauli
//! byproduct correction. Deciding which command comes next is left to the
//! caller.

pub mod clifford;
pub mod core;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::clifford::Clifford;
pub use crate::core::{NodeId, SimError};
pub use crate::operations::{Command, CorrectionKind, MeasureUpdate, Plane};
pub use crate::simulation::{SimulationResult, Simulator, SimulatorConfig, StateVec};
pub use crate::validation::{check_normalization, validate_state};

// Example 1: Driving the register directly
// The executor owns the outcome record and the RNG; the register only
// consumes them.
/// ```
/// use mbqsim::{Clifford, CorrectionKind, NodeId, Plane, SimError, StateVec};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// fn nid(id: u64) -> NodeId { NodeId(id) }
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut outcomes: Vec<u8> = Vec::new();
///
/// let mut state = StateVec::default();
/// state.prepare(nid(0))?;
/// state.prepare(nid(1))?;
/// state.entangle(nid(0), nid(1))?;
///
/// let s = state.measure(nid(0), Plane::XY, 0.0, &[], &[], &outcomes, Clifford::IDENTITY, &mut rng)?;
/// outcomes.push(s);
/// state.apply_correction(CorrectionKind::PauliX, nid(1), &[0], &outcomes)?;
///
/// // Node 1 now holds H|+> = |0> whatever the outcome was.
/// assert_eq!(state.node_index(), &[nid(1)]);
/// assert!((state.state_vector()[0].re - 1.0).abs() < 1e-10);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Running a command sequence in a seeded session
/// ```
/// use mbqsim::{Command, NodeId, Plane, Simulator, SimulatorConfig, SimError};
///
/// fn nid(id: u64) -> NodeId { NodeId(id) }
///
/// let pattern = vec![
///     Command::N { node: nid(0) },
///     Command::N { node: nid(1) },
///     Command::E { nodes: (nid(0), nid(1)) },
///     Command::measure(nid(0), Plane::XY, 0.5),
/// ];
///
/// let first = Simulator::with_config(SimulatorConfig::seeded(99)).run(&pattern)?;
/// let again = Simulator::with_config(SimulatorConfig::seeded(99)).run(&pattern)?;
/// assert_eq!(first.outcomes(), again.outcomes());
/// println!("{}", first);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
