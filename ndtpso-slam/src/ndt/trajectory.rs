//! Trajectory records.

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;

/// One estimated pose, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Scan timestamp in seconds.
    pub timestamp: f64,
    /// Estimated sensor-base pose.
    pub pose: Pose2D,
    /// Auxiliary motion estimate supplied with the scan, if any.
    pub auxiliary: Option<Pose2D>,
}

impl TrajectoryRecord {
    /// Create a new record.
    pub fn new(timestamp: f64, pose: Pose2D, auxiliary: Option<Pose2D>) -> Self {
        Self {
            timestamp,
            pose,
            auxiliary,
        }
    }
}
