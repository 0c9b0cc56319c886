//! Sensor mounting section.

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;

/// Where the range sensor sits on the robot base.
///
/// Applied as the origin of every local frame, so scan points enter the
/// pipeline in the base frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSection {
    /// Mount X offset (meters, forward)
    #[serde(default)]
    pub mount_x: f64,

    /// Mount Y offset (meters, left)
    #[serde(default)]
    pub mount_y: f64,

    /// Mount yaw (radians)
    #[serde(default)]
    pub mount_theta: f64,
}

impl SensorSection {
    /// Mounting transform as a pose.
    pub fn mount_pose(&self) -> Pose2D {
        Pose2D::new(self.mount_x, self.mount_y, self.mount_theta)
    }
}
