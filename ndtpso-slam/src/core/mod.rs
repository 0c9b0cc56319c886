//! Core geometry types.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward
//! - **Y-axis**: Left
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! Everything is `f64`: reference cells accumulate sums of squared
//! coordinates tens of meters from the origin, and the covariance is the
//! difference of two such sums.
//!
//! - [`Pose2D`]: planar rigid transform
//! - [`Point2D`], [`GridCoord`]: metric points and integer cell indices
//! - [`Covariance2D`]: symmetric 2x2 matrix with closed-form eigenvalues
//! - [`LaserScan`]: decoded range samples

mod covariance;
pub mod math;
mod point;
mod pose;
mod scan;

pub use covariance::Covariance2D;
pub use math::{angle_diff, normalize_angle};
pub use point::{GridCoord, Point2D};
pub use pose::Pose2D;
pub use scan::LaserScan;
