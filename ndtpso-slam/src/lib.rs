//! # NDT-PSO SLAM
//!
//! 2D scan matching and mapping with Normal-Distributions-Transform grids
//! aligned by particle swarm optimization.
//!
//! ## Overview
//!
//! Each range scan is loaded into a local NDT frame and aligned against a
//! persistent reference frame:
//!
//! - **NDT grid**: every cell summarizes its points as a 2-D Gaussian
//! - **Swarm alignment**: particles search pose offsets around the previous
//!   pose on a worker pool, with no gradients needed
//! - **Incremental fusion**: the accepted pose places the scan into the
//!   reference frame and, periodically, into an exported map accumulator
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ndtpso_slam::{LaserScan, NdtPsoConfig, NdtPsoSlam};
//!
//! let slam = NdtPsoSlam::new(NdtPsoConfig::load_default()?)?;
//!
//! let scan = LaserScan::new(ranges, angle_min, angle_increment, range_max, timestamp);
//! let result = slam.submit_scan(&scan, None);
//! println!("pose {} score {:.2}", result.pose, result.score);
//!
//! ndtpso_slam::io::export_snapshot(&slam.export_snapshot(), dir, "run")?;
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core geometry types
pub mod core;

// NDT cells and frames
pub mod ndt;

// Particle swarm alignment
pub mod pso;

// Scan-to-map pipeline and pose publishing
pub mod pipeline;

// Unified configuration
pub mod config;

// CSV export
pub mod io;

mod error;

// Re-export commonly used types
pub use core::{Covariance2D, GridCoord, LaserScan, Point2D, Pose2D};

pub use ndt::{FrameKind, MapSnapshot, NdtCell, NdtFrame, TrajectoryRecord};

pub use pso::{AlignmentResult, PsoConfig, SwarmAligner};

pub use pipeline::{CycleResult, CycleStats, NdtPsoSlam, PosePublisher, PublishedPose};

pub use config::NdtPsoConfig;

pub use error::{NdtPsoError, Result};
