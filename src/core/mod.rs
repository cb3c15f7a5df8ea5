// src/core/mod.rs

//! Core data structures: labels, errors, the amplitude tensor and the
//! dense linear-algebra primitives it is built on.

pub mod error;
pub mod linalg;
pub mod node_index;
pub mod tensor;

// Re-export public types for convenient access via `mbqsim::core::TypeName`
pub use error::{NodeId, Result, SimError};
pub use linalg::Matrix2;
pub use node_index::NodeIndex;
pub use tensor::AmplitudeTensor;

pub mod constants;
pub use constants::sim_constants::{NORM_TOLERANCE, PI};
