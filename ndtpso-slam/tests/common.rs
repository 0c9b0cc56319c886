//! Test utilities for NDT-PSO SLAM.
//!
//! Provides a ray-cast room simulator producing `LaserScan`s from known
//! poses, plus pose assertions.

#![allow(dead_code)]

use std::f64::consts::PI;

use ndtpso_slam::{LaserScan, NdtPsoConfig, Point2D, Pose2D, PsoConfig};

/// Range reported for beams that hit nothing.
pub const RANGE_MAX: f32 = 12.0;

/// Beams per simulated scan (0.5 degree spacing).
pub const BEAMS_DEFAULT: usize = 720;

/// A 2D world made of wall segments and round pillars.
pub struct Room {
    walls: Vec<(Point2D, Point2D)>,
    pillars: Vec<(Point2D, f64)>,
}

impl Room {
    /// Empty world.
    pub fn new() -> Self {
        Self {
            walls: Vec::new(),
            pillars: Vec::new(),
        }
    }

    /// Add a wall segment.
    pub fn wall(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.walls.push((Point2D::new(x0, y0), Point2D::new(x1, y1)));
        self
    }

    /// Add a closed axis-aligned rectangle of walls.
    pub fn rectangle(self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        self.wall(min_x, min_y, max_x, min_y)
            .wall(max_x, min_y, max_x, max_y)
            .wall(max_x, max_y, min_x, max_y)
            .wall(min_x, max_y, min_x, min_y)
    }

    /// Add a round pillar.
    pub fn pillar(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.pillars.push((Point2D::new(x, y), radius));
        self
    }

    /// Asymmetric 9m x 6m room with two pillars and a stub wall.
    pub fn furnished() -> Self {
        Self::new()
            .rectangle(-4.0, -3.0, 5.0, 3.0)
            .wall(2.0, -3.0, 2.0, -1.6)
            .pillar(1.5, 1.2, 0.3)
            .pillar(-2.0, -1.0, 0.25)
    }

    /// Distance along a ray to the nearest surface.
    pub fn cast(&self, origin: Point2D, angle: f64) -> Option<f64> {
        let (sin, cos) = angle.sin_cos();
        let dir = Point2D::new(cos, sin);
        let mut best: Option<f64> = None;
        let mut consider = |t: f64| {
            if t > 1e-9 && best.is_none_or(|b| t < b) {
                best = Some(t);
            }
        };

        for &(a, b) in &self.walls {
            let edge = b - a;
            let denom = cross(dir, edge);
            if denom.abs() < 1e-12 {
                continue;
            }
            let to_a = a - origin;
            let t = cross(to_a, edge) / denom;
            let u = cross(to_a, dir) / denom;
            if (0.0..=1.0).contains(&u) {
                consider(t);
            }
        }

        for &(center, radius) in &self.pillars {
            let to_origin = origin - center;
            let b = to_origin.x * dir.x + to_origin.y * dir.y;
            let c = to_origin.x * to_origin.x + to_origin.y * to_origin.y - radius * radius;
            let disc = b * b - c;
            if disc >= 0.0 {
                consider(-b - disc.sqrt());
            }
        }

        best
    }

    /// Full-circle scan from `pose` with `beams` samples.
    ///
    /// Beams that hit nothing report `RANGE_MAX`, which the pipeline
    /// treats as no return.
    pub fn scan(&self, pose: Pose2D, beams: usize, timestamp: f64) -> LaserScan {
        let increment = 2.0 * PI / beams as f64;
        let ranges = (0..beams)
            .map(|i| {
                let bearing = -PI + i as f64 * increment;
                match self.cast(pose.position(), pose.theta + bearing) {
                    Some(t) if t < RANGE_MAX as f64 => t as f32,
                    _ => RANGE_MAX,
                }
            })
            .collect();
        LaserScan::new(ranges, -PI as f32, increment as f32, RANGE_MAX, timestamp)
    }
}

fn cross(a: Point2D, b: Point2D) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Configuration with a seeded swarm and explicit size.
pub fn seeded_config(population: usize, iterations: usize, radius: [f64; 3]) -> NdtPsoConfig {
    let mut config = NdtPsoConfig::default();
    config.ndt.frame_size = 30.0;
    config.map.size = 30.0;
    config.pso = PsoConfig {
        population_size: population,
        iterations,
        search_radius: radius,
        ..PsoConfig::default()
    }
    .with_seed(42)
    .with_threads(2);
    config
}

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert two poses are approximately equal.
pub fn assert_poses_close(actual: &Pose2D, expected: &Pose2D, trans_tol: f64, rot_tol: f64) {
    let trans_error = actual.distance(*expected);
    let rot_error = actual.angular_distance(*expected);

    assert!(
        trans_error < trans_tol,
        "Translation error {:.4} exceeds tolerance {} (expected {}, got {})",
        trans_error,
        trans_tol,
        expected,
        actual
    );
    assert!(
        rot_error < rot_tol,
        "Rotation error {:.4} exceeds tolerance {} (expected {}, got {})",
        rot_error,
        rot_tol,
        expected,
        actual
    );
}
