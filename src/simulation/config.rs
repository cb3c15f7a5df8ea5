// src/simulation/config.rs

use crate::core::constants::sim_constants::NORM_TOLERANCE;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Settings for a [`Simulator`](super::Simulator) session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Seed for the measurement RNG. `None` draws a seed from the OS, so runs
    /// are only reproducible when a seed is given.
    pub seed: Option<u64>,
    /// Norms below this are treated as zero (degenerate-norm checks and the
    /// qubit-removal branch fallback).
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { seed: None, norm_tolerance: NORM_TOLERANCE }
    }
}

impl SimulatorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn with_norm_tolerance(mut self, norm_tolerance: f64) -> Self {
        self.norm_tolerance = norm_tolerance;
        self
    }

    pub(crate) fn build_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
