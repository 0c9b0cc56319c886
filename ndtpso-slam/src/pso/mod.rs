//! Particle swarm optimization over pose offsets.
//!
//! The swarm maximizes `reference.evaluate(previous ⊕ offset, local)`
//! without gradients: the NDT score surface is smooth near the optimum but
//! has plateaus and local maxima further out, which particles sampling the
//! whole search box handle well.
//!
//! - [`SwarmAligner`]: owns the worker pool and runs one alignment per call
//! - [`PsoConfig`]: population, iterations, bounds and coefficients
//! - [`Particle`]: position, velocity, personal best and random stream
//! - [`AlignmentResult`]: accepted pose with scores and diagnostics

mod aligner;
mod config;
mod particle;
mod types;

pub use aligner::SwarmAligner;
pub use config::PsoConfig;
pub use particle::{Motion, Offset, Particle, SwarmBest, clip_offset};
pub use types::AlignmentResult;
