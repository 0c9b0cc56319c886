//! Swarm particles.

use rand::Rng;
use rand::rngs::StdRng;

/// Offset `[dx, dy, dθ]` relative to the previous pose.
pub type Offset = [f64; 3];

/// Best offset found so far and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmBest {
    /// Offset.
    pub position: Offset,
    /// Score of `position`.
    pub score: f64,
}

impl SwarmBest {
    /// Keep the higher-scoring of two bests; ties keep `self`.
    #[inline]
    pub fn max(self, other: SwarmBest) -> SwarmBest {
        if other.score > self.score { other } else { self }
    }
}

/// One candidate offset moving through the search box.
///
/// Each particle owns its random stream, so a seeded swarm behaves the
/// same whichever worker thread moves it.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Current offset.
    pub position: Offset,
    /// Current velocity.
    pub velocity: Offset,
    /// Best offset this particle has visited.
    pub best: SwarmBest,
    rng: StdRng,
}

impl Particle {
    /// Create a particle. Its personal best is unset until evaluated.
    pub fn new(position: Offset, velocity: Offset, rng: StdRng) -> Self {
        Self {
            position,
            velocity,
            best: SwarmBest {
                position,
                score: f64::NEG_INFINITY,
            },
            rng,
        }
    }

    /// Particle at a uniformly random offset in `±bounds` with a random
    /// velocity in `±velocity_bounds`.
    pub fn random(mut rng: StdRng, bounds: &Offset, velocity_bounds: &Offset) -> Self {
        let position = random_offset(&mut rng, bounds);
        let velocity = random_offset(&mut rng, velocity_bounds);
        Self::new(position, velocity, rng)
    }

    /// Particle at a chosen offset with a random velocity.
    pub fn at(position: Offset, mut rng: StdRng, velocity_bounds: &Offset) -> Self {
        let velocity = random_offset(&mut rng, velocity_bounds);
        Self::new(position, velocity, rng)
    }

    /// Record the score of the current position, updating the personal best.
    #[inline]
    pub fn record(&mut self, score: f64) {
        if score > self.best.score {
            self.best = SwarmBest {
                position: self.position,
                score,
            };
        }
    }

    /// Move one step:
    ///
    /// ```text
    /// v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
    /// x = clip(x + clamp(v))
    /// ```
    pub fn step(&mut self, global: &Offset, motion: &Motion) {
        for axis in 0..3 {
            let r1: f64 = self.rng.random();
            let r2: f64 = self.rng.random();
            let x = self.position[axis];
            let v = motion.inertia * self.velocity[axis]
                + motion.cognitive * r1 * (self.best.position[axis] - x)
                + motion.social * r2 * (global[axis] - x);
            let v = v.clamp(-motion.max_velocity[axis], motion.max_velocity[axis]);
            self.velocity[axis] = v;
            self.position[axis] = (x + v).clamp(-motion.bounds[axis], motion.bounds[axis]);
        }
    }
}

/// Coefficients of one swarm iteration.
#[derive(Clone, Copy, Debug)]
pub struct Motion {
    /// Inertia weight for this iteration.
    pub inertia: f64,
    /// Pull toward the personal best.
    pub cognitive: f64,
    /// Pull toward the swarm best.
    pub social: f64,
    /// Per-axis velocity clamp.
    pub max_velocity: Offset,
    /// Per-axis position bound.
    pub bounds: Offset,
}

/// Clip an offset into `±bounds`.
#[inline]
pub fn clip_offset(offset: Offset, bounds: &Offset) -> Offset {
    [
        offset[0].clamp(-bounds[0], bounds[0]),
        offset[1].clamp(-bounds[1], bounds[1]),
        offset[2].clamp(-bounds[2], bounds[2]),
    ]
}

fn random_offset(rng: &mut StdRng, bounds: &Offset) -> Offset {
    [
        rng.random_range(-bounds[0]..=bounds[0]),
        rng.random_range(-bounds[1]..=bounds[1]),
        rng.random_range(-bounds[2]..=bounds[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn motion(bounds: Offset) -> Motion {
        Motion {
            inertia: 0.9,
            cognitive: 1.5,
            social: 1.5,
            max_velocity: bounds.map(|b| 0.5 * b),
            bounds,
        }
    }

    #[test]
    fn test_random_particle_within_bounds() {
        let bounds = [0.5, 0.5, 0.2];
        for seed in 0..50 {
            let p = Particle::random(StdRng::seed_from_u64(seed), &bounds, &bounds.map(|b| 0.1 * b));
            for axis in 0..3 {
                assert!(p.position[axis].abs() <= bounds[axis]);
                assert!(p.velocity[axis].abs() <= 0.1 * bounds[axis]);
            }
        }
    }

    #[test]
    fn test_step_clamps_velocity_and_position() {
        let bounds = [0.5, 0.5, 0.2];
        let mut p = Particle::new([0.45, -0.45, 0.0], [0.0; 3], StdRng::seed_from_u64(1));
        p.record(1.0);
        for _ in 0..20 {
            p.step(&[10.0, -10.0, 10.0], &motion(bounds));
            for axis in 0..3 {
                assert!(p.velocity[axis].abs() <= 0.5 * bounds[axis] + 1e-12);
                assert!(p.position[axis].abs() <= bounds[axis]);
            }
        }
        // Pulled hard toward a best outside the box
        assert!(p.position[0] > 0.3);
        assert!(p.position[1] < -0.3);
    }

    #[test]
    fn test_record_keeps_personal_best() {
        let mut p = Particle::new([0.1, 0.0, 0.0], [0.0; 3], StdRng::seed_from_u64(2));
        p.record(3.0);
        p.position = [0.2, 0.0, 0.0];
        p.record(1.0);
        assert_eq!(p.best.position, [0.1, 0.0, 0.0]);
        assert_eq!(p.best.score, 3.0);
    }

    #[test]
    fn test_swarm_best_ties_keep_first() {
        let a = SwarmBest { position: [1.0, 0.0, 0.0], score: 2.0 };
        let b = SwarmBest { position: [2.0, 0.0, 0.0], score: 2.0 };
        assert_eq!(a.max(b), a);
        assert_eq!(a.max(SwarmBest { score: 3.0, ..b }), SwarmBest { score: 3.0, ..b });
    }

    #[test]
    fn test_zero_radius_axis_stays_fixed() {
        let bounds = [0.5, 0.5, 0.0];
        let mut p = Particle::random(StdRng::seed_from_u64(3), &bounds, &bounds.map(|b| 0.1 * b));
        p.record(0.0);
        p.step(&[0.1, 0.1, 0.0], &motion(bounds));
        assert_eq!(p.position[2], 0.0);
    }
}
