//! Particle swarm scan alignment.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::core::{Point2D, Pose2D};
use crate::error::Result;
use crate::ndt::NdtFrame;

use super::config::PsoConfig;
use super::particle::{Motion, Offset, Particle, SwarmBest, clip_offset};
use super::types::AlignmentResult;

/// Finds the pose at which a local frame best matches a reference frame.
///
/// Candidates are offsets applied to the previous pose
/// (`previous.compose(offset)`), searched by a particle swarm inside the
/// box `±search_radius`. The worker pool is built once and reused by every
/// call.
///
/// # Iteration barrier
///
/// ```text
///   particles  [p0 p1 p2 | p3 p4 p5 | p6 p7 ]   one chunk per worker
///                  │          │          │
///              move+score move+score move+score
///                  │          │          │
///              chunk best chunk best chunk best
///                  └──────────┼──────────┘
///                        global best        (join)
/// ```
pub struct SwarmAligner {
    config: PsoConfig,
    pool: rayon::ThreadPool,
    threads: usize,
}

impl SwarmAligner {
    /// Create an aligner and its worker pool.
    ///
    /// Fails with [`InvalidConfig`](crate::NdtPsoError::InvalidConfig) if the
    /// swarm parameters could not run.
    pub fn new(config: PsoConfig) -> Result<Self> {
        config.validate()?;
        let threads = config.resolved_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("pso-worker-{}", i))
            .build()?;
        Ok(Self {
            config,
            pool,
            threads,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Align `local` against `reference`, starting from `previous`.
    ///
    /// `prediction`, when given, is an offset from `previous` (for example
    /// odometry motion since the last scan) that seeds the first particle;
    /// it is clipped into the search box.
    ///
    /// The returned pose never scores below `previous`: a swarm result is
    /// accepted only if strictly better than the zero offset.
    pub fn align(
        &self,
        reference: &NdtFrame,
        local: &NdtFrame,
        previous: Pose2D,
        prediction: Option<Pose2D>,
    ) -> AlignmentResult {
        let points = local.points();
        if points.is_empty() {
            debug!("[SwarmAligner] Empty local frame, keeping {}", previous);
            return AlignmentResult::degenerate(previous);
        }
        let points: &[Point2D] = &points;

        let bounds = self.config.search_radius.map(f64::abs);
        let score_of = |offset: &Offset| {
            reference.evaluate_points(previous.compose(Pose2D::from_array(*offset)), points)
        };

        let baseline_score = score_of(&[0.0; 3]);
        let mut particles = self.spawn_particles(&bounds, prediction);
        let population = particles.len();
        let chunk_size = population.div_ceil(self.threads).max(1);

        let motion_at = |iteration: usize| Motion {
            inertia: self.config.inertia_at(iteration),
            cognitive: self.config.cognitive,
            social: self.config.social,
            max_velocity: bounds.map(|b| b * self.config.max_velocity_fraction),
            bounds,
        };

        let best = self.pool.install(|| {
            let mut best = particles
                .par_chunks_mut(chunk_size)
                .map(|chunk| {
                    chunk_best(chunk.iter_mut().map(|p| {
                        p.record(score_of(&p.position));
                        p.best
                    }))
                })
                .reduce(unset_best, SwarmBest::max);

            for iteration in 0..self.config.iterations {
                let motion = motion_at(iteration);
                let global = best.position;
                let round = particles
                    .par_chunks_mut(chunk_size)
                    .map(|chunk| {
                        chunk_best(chunk.iter_mut().map(|p| {
                            p.step(&global, &motion);
                            p.record(score_of(&p.position));
                            p.best
                        }))
                    })
                    .reduce(unset_best, SwarmBest::max);
                best = best.max(round);
                trace!(
                    "[SwarmAligner] iteration {}: best {:.4} at {:?}",
                    iteration, best.score, best.position
                );
            }
            best
        });

        let evaluations = 1 + population * (self.config.iterations + 1);
        if best.score > baseline_score {
            let offset = Pose2D::from_array(best.position);
            AlignmentResult {
                pose: previous.compose(offset),
                offset,
                score: best.score,
                baseline_score,
                improved: true,
                evaluations,
                degenerate: false,
            }
        } else {
            AlignmentResult {
                pose: previous,
                offset: Pose2D::identity(),
                score: baseline_score,
                baseline_score,
                improved: false,
                evaluations,
                degenerate: false,
            }
        }
    }

    /// Particle 0 at the predicted (or zero) offset, the rest uniform in the box.
    fn spawn_particles(&self, bounds: &Offset, prediction: Option<Pose2D>) -> Vec<Particle> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let velocity_bounds = bounds.map(|b| b * self.config.initial_velocity_fraction);
        let population = self.config.population_size.max(1);

        (0..population)
            .map(|i| {
                let rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                if i == 0 {
                    let start = prediction
                        .map(|p| clip_offset(p.to_array(), bounds))
                        .unwrap_or([0.0; 3]);
                    Particle::at(start, rng, &velocity_bounds)
                } else {
                    Particle::random(rng, bounds, &velocity_bounds)
                }
            })
            .collect()
    }
}

fn unset_best() -> SwarmBest {
    SwarmBest {
        position: [0.0; 3],
        score: f64::NEG_INFINITY,
    }
}

fn chunk_best(bests: impl Iterator<Item = SwarmBest>) -> SwarmBest {
    bests.fold(unset_best(), SwarmBest::max)
}
