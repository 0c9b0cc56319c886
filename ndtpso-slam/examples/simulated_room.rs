//! Simulated room mapping example.
//!
//! This example demonstrates:
//! - Ray-casting range scans in a simple room while driving a loop
//! - Feeding scans plus noisy odometry to `NdtPsoSlam`
//! - Reading poses from the fixed-rate `PosePublisher`
//! - Exporting the trajectory and map as CSV
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --example simulated_room -- --steps 120 --output ./output
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ndtpso_slam::io::export_snapshot;
use ndtpso_slam::{LaserScan, NdtPsoConfig, NdtPsoSlam, Point2D, PosePublisher, Pose2D};

/// Map a simulated room with NDT-PSO SLAM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: String,

    /// Output directory for CSV files
    #[arg(short, long)]
    output: Option<String>,

    /// Number of scans to simulate
    #[arg(long, default_value = "120")]
    steps: usize,

    /// Beams per scan
    #[arg(long, default_value = "720")]
    beams: usize,

    /// Odometry noise per step (meters / radians, uniform)
    #[arg(long, default_value = "0.02")]
    odom_noise: f64,

    /// Random seed for odometry noise
    #[arg(long, default_value = "7")]
    seed: u64,
}

/// Wall segments of a 10m x 7m room with an inner partition.
const WALLS: [(f64, f64, f64, f64); 6] = [
    (-4.0, -3.0, 6.0, -3.0),
    (6.0, -3.0, 6.0, 4.0),
    (6.0, 4.0, -4.0, 4.0),
    (-4.0, 4.0, -4.0, -3.0),
    (1.0, -3.0, 1.0, -1.8),
    (3.0, 2.5, 3.0, 4.0),
];

const RANGE_MAX: f32 = 8.0;

fn cast(origin: Point2D, angle: f64) -> f32 {
    let (sin, cos) = angle.sin_cos();
    let mut best = f64::INFINITY;
    for &(x0, y0, x1, y1) in &WALLS {
        let (ex, ey) = (x1 - x0, y1 - y0);
        let denom = cos * ey - sin * ex;
        if denom.abs() < 1e-12 {
            continue;
        }
        let (ax, ay) = (x0 - origin.x, y0 - origin.y);
        let t = (ax * ey - ay * ex) / denom;
        let u = (ax * sin - ay * cos) / denom;
        if t > 0.0 && (0.0..=1.0).contains(&u) {
            best = best.min(t);
        }
    }
    if best < RANGE_MAX as f64 {
        best as f32
    } else {
        RANGE_MAX
    }
}

fn simulate_scan(pose: Pose2D, beams: usize, timestamp: f64) -> LaserScan {
    let increment = 2.0 * std::f64::consts::PI / beams as f64;
    let ranges = (0..beams)
        .map(|i| cast(pose.position(), pose.theta - std::f64::consts::PI + i as f64 * increment))
        .collect();
    LaserScan::new(
        ranges,
        -std::f32::consts::PI,
        increment as f32,
        RANGE_MAX,
        timestamp,
    )
}

/// Rounded-rectangle loop inside the room.
fn ground_truth(step: usize, steps: usize) -> Pose2D {
    let t = step as f64 / steps as f64 * 2.0 * std::f64::consts::PI;
    let x = 1.0 + 3.0 * t.cos();
    let y = 0.5 + 1.5 * t.sin();
    let heading = (1.5 * t.cos()).atan2(-3.0 * t.sin());
    Pose2D::new(x, y, heading)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = if Path::new(&args.config).exists() {
        NdtPsoConfig::load(Path::new(&args.config))?
    } else {
        log::warn!("Config {} not found, using defaults", args.config);
        NdtPsoConfig::default()
    };
    let output_dir = PathBuf::from(
        args.output
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone()),
    );
    let prefix = config.export.prefix.clone();
    let rate_hz = config.publish.rate_hz;

    // The map frame is the first scan's pose.
    let start = ground_truth(0, args.steps);
    let slam = Arc::new(NdtPsoSlam::new(config)?);
    let publisher = PosePublisher::spawn(Arc::clone(&slam), rate_hz)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut odometry = Pose2D::identity();
    let mut previous_truth = start;
    let mut max_error: f64 = 0.0;
    let started = Instant::now();

    for step in 0..args.steps {
        let truth = ground_truth(step, args.steps);
        let motion = previous_truth.relative_to(truth);
        let noisy = Pose2D::new(
            motion.x + rng.random_range(-args.odom_noise..=args.odom_noise),
            motion.y + rng.random_range(-args.odom_noise..=args.odom_noise),
            motion.theta + rng.random_range(-args.odom_noise..=args.odom_noise),
        );
        if step > 0 {
            odometry = odometry.compose(noisy);
        }
        previous_truth = truth;

        let scan = simulate_scan(truth, args.beams, step as f64 * 0.1);
        let result = slam.submit_scan(&scan, Some(odometry));

        let expected = start.relative_to(truth);
        let error = result.pose.distance(expected);
        max_error = max_error.max(error);
        log::debug!(
            "step {:3}: estimate {} truth {} error {:.3}m",
            step,
            result.pose,
            expected,
            error
        );
    }

    let received = publisher.receiver().try_iter().count();
    publisher.stop();

    let stats = slam.stats();
    log::info!("{}", stats.summary());
    log::info!(
        "Processed {} scans in {:.2}s, max translation error {:.3}m, {} poses published",
        args.steps,
        started.elapsed().as_secs_f64(),
        max_error,
        received
    );

    let snapshot = slam.export_snapshot();
    log::info!(
        "Map: {} scored cells, {} points, {} trajectory records",
        snapshot.scored_cells().count(),
        snapshot.total_points(),
        snapshot.trajectory.len()
    );
    let (pose_path, map_path) = export_snapshot(&snapshot, &output_dir, &prefix)?;
    println!("Trajectory: {}", pose_path.display());
    println!("Map:        {}", map_path.display());
    Ok(())
}
