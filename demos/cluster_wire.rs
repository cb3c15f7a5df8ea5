//! Runs a three-node cluster wire under several seeds and shows that the
//! corrected output does not depend on the measurement outcomes.
//!
//! `RUST_LOG=mbqsim=debug cargo run --example cluster_wire` prints every
//! command as the register sees it.

use mbqsim::{Clifford, Command, NodeId, Plane, SimError, Simulator, SimulatorConfig};
use num_complex::Complex64;
use tracing_subscriber::EnvFilter;

// Helper for NodeId creation
fn nid(id: u64) -> NodeId { NodeId(id) }

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("--- mbqsim Example: Three-Node Cluster Wire ---");

    // Node 0 is the input, node 2 the output. Each XY measurement at -a
    // applies J(a) = H diag(1, e^{ia}); byproducts are fixed up at the end.
    let (alpha, beta) = (0.3, 0.7);
    let pattern = vec![
        Command::N { node: nid(0) },
        Command::N { node: nid(1) },
        Command::N { node: nid(2) },
        Command::E { nodes: (nid(0), nid(1)) },
        Command::E { nodes: (nid(1), nid(2)) },
        Command::measure(nid(0), Plane::XY, -alpha),
        Command::M {
            node: nid(1),
            plane: Plane::XY,
            angle: -beta,
            s_domain: vec![0], // adapt to the X byproduct left by node 0
            t_domain: vec![],
            vop: Clifford::IDENTITY,
        },
        Command::X { node: nid(2), domain: vec![1] },
        Command::Z { node: nid(2), domain: vec![0] },
    ];

    println!("\nPattern:");
    for command in &pattern {
        println!("  {}", command);
    }

    let mut reference: Option<Vec<Complex64>> = None;
    println!("\nRunning 8 seeded sessions...");
    for seed in 0..8 {
        let result = Simulator::with_config(SimulatorConfig::seeded(seed)).run(&pattern)?;
        let state = result.state().to_vec();
        let fidelity = match &reference {
            Some(first) => first.iter().zip(&state).map(|(a, b)| a.conj() * b).sum::<Complex64>().norm(),
            None => 1.0,
        };
        println!(
            "  seed {:>2}: outcomes {:?}, output [{:.4}, {:.4}], |<first|this>| = {:.6}",
            seed,
            result.outcomes(),
            state[0],
            state[1],
            fidelity
        );
        reference.get_or_insert(state);
    }

    println!("\nAll outputs agree up to a global phase.");
    Ok(())
}
