//! Particle swarm configuration.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::error::{NdtPsoError, Result};

/// Configuration for [`SwarmAligner`](super::SwarmAligner).
///
/// The swarm searches offsets `[dx, dy, dθ]` applied to the previous pose,
/// each axis bounded by `±search_radius`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsoConfig {
    /// Number of particles.
    #[serde(default = "defaults::population_size")]
    pub population_size: usize,

    /// Move-and-evaluate rounds after the initial evaluation.
    #[serde(default = "defaults::iterations")]
    pub iterations: usize,

    /// Worker threads. 0 or negative uses every hardware thread.
    #[serde(default = "defaults::num_threads")]
    pub num_threads: i32,

    /// Half-width of the search box per axis: `[x (m), y (m), theta (rad)]`.
    #[serde(default = "defaults::search_radius")]
    pub search_radius: [f64; 3],

    /// Inertia weight at the first iteration.
    #[serde(default = "defaults::inertia_start")]
    pub inertia_start: f64,

    /// Inertia weight at the last iteration.
    #[serde(default = "defaults::inertia_end")]
    pub inertia_end: f64,

    /// Pull toward the particle's own best.
    #[serde(default = "defaults::cognitive")]
    pub cognitive: f64,

    /// Pull toward the swarm's best.
    #[serde(default = "defaults::social")]
    pub social: f64,

    /// Initial velocity bound as a fraction of `search_radius`.
    #[serde(default = "defaults::initial_velocity_fraction")]
    pub initial_velocity_fraction: f64,

    /// Velocity clamp as a fraction of `search_radius`.
    #[serde(default = "defaults::max_velocity_fraction")]
    pub max_velocity_fraction: f64,

    /// Fixed seed for reproducible runs. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            population_size: defaults::population_size(),
            iterations: defaults::iterations(),
            num_threads: defaults::num_threads(),
            search_radius: defaults::search_radius(),
            inertia_start: defaults::inertia_start(),
            inertia_end: defaults::inertia_end(),
            cognitive: defaults::cognitive(),
            social: defaults::social(),
            initial_velocity_fraction: defaults::initial_velocity_fraction(),
            max_velocity_fraction: defaults::max_velocity_fraction(),
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, num_threads: i32) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Worker threads to spawn, resolving 0/negative to the hardware count.
    pub fn resolved_threads(&self) -> usize {
        if self.num_threads > 0 {
            self.num_threads as usize
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }

    /// Check that the swarm can run with these values.
    ///
    /// Zero iterations are allowed here (the swarm keeps its initial
    /// placement); the pipeline configuration rejects them separately.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(NdtPsoError::InvalidConfig(
                "pso.population_size must be at least 1".to_string(),
            ));
        }
        if let Some(r) = self
            .search_radius
            .iter()
            .find(|r| !(r.is_finite() && **r >= 0.0))
        {
            return Err(NdtPsoError::InvalidConfig(format!(
                "pso.search_radius entries must be non-negative, got {}",
                r
            )));
        }

        let coefficients = [
            ("pso.inertia_start", self.inertia_start),
            ("pso.inertia_end", self.inertia_end),
            ("pso.cognitive", self.cognitive),
            ("pso.social", self.social),
            ("pso.initial_velocity_fraction", self.initial_velocity_fraction),
            ("pso.max_velocity_fraction", self.max_velocity_fraction),
        ];
        for (name, value) in coefficients {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NdtPsoError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Inertia weight for iteration `iteration` of `iterations`.
    ///
    /// Decays linearly from `inertia_start` to `inertia_end`.
    pub fn inertia_at(&self, iteration: usize) -> f64 {
        if self.iterations <= 1 {
            return self.inertia_start;
        }
        let t = iteration as f64 / (self.iterations - 1) as f64;
        self.inertia_start + (self.inertia_end - self.inertia_start) * t.min(1.0)
    }
}
