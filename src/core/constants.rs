//! Numerical constants shared by the simulator.

/// Constants used by the state-vector simulation.
pub mod sim_constants {
    /// Default threshold below which a norm is treated as zero.
    pub const NORM_TOLERANCE: f64 = 1e-8;
    /// Amplitude of each basis value in |+> and |->.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Used for measurement angles, which callers give in units of π.
    pub const PI: f64 = std::f64::consts::PI;
}
