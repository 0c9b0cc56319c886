//! 2D pose type for sensor position and heading.

use serde::{Deserialize, Serialize};

use super::math::{angle_diff, angles_approx_equal, normalize_angle};
use super::point::Point2D;

/// A planar rigid transform: position (x, y) and heading theta.
///
/// Theta is kept normalized to (-π, π] by every constructor.
///
/// # Composition
///
/// `a.compose(b)` applies `b` in `a`'s frame. Composition is
/// not commutative:
/// ```
/// use ndtpso_slam::core::Pose2D;
/// use std::f64::consts::FRAC_PI_2;
///
/// let turn = Pose2D::new(0.0, 0.0, FRAC_PI_2);
/// let step = Pose2D::new(1.0, 0.0, 0.0);
/// let a = turn.compose(step); // step forward after turning: ends up at (0, 1)
/// let b = step.compose(turn); // turn after stepping: ends up at (1, 0)
/// assert!((a.y - 1.0).abs() < 1e-12 && (b.x - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f64,
    /// Y position in meters.
    pub y: f64,
    /// Heading in radians (-π, π], CCW positive from the X axis.
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose, normalizing theta.
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// The identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Pose from an `[x, y, theta]` vector.
    #[inline]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Pose as an `[x, y, theta]` vector.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.theta]
    }

    /// Position part.
    #[inline]
    pub fn position(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Transform a point from this pose's local frame to the parent frame.
    #[inline]
    pub fn transform_point(self, point: Point2D) -> Point2D {
        let (sin, cos) = self.theta.sin_cos();
        Point2D {
            x: self.x + point.x * cos - point.y * sin,
            y: self.y + point.x * sin + point.y * cos,
        }
    }

    /// Apply `other` in this pose's frame.
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let pos = self.transform_point(other.position());
        Self::new(pos.x, pos.y, self.theta + other.theta)
    }

    /// Inverse transform: `pose.compose(pose.inverse())` is the identity.
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// Pose of `other` expressed in this pose's frame.
    ///
    /// `self.compose(self.relative_to(other)) ≈ other`
    #[inline]
    pub fn relative_to(self, other: Pose2D) -> Self {
        self.inverse().compose(other)
    }

    /// Translation distance to another pose.
    #[inline]
    pub fn distance(self, other: Pose2D) -> f64 {
        self.position().distance(&other.position())
    }

    /// Absolute heading difference to another pose.
    #[inline]
    pub fn angular_distance(self, other: Pose2D) -> f64 {
        angle_diff(self.theta, other.theta).abs()
    }

    /// Check approximate equality with separate position and angle tolerances.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f64, angle_epsilon: f64) -> bool {
        (self.x - other.x).abs() <= pos_epsilon
            && (self.y - other.y).abs() <= pos_epsilon
            && angles_approx_equal(self.theta, other.theta, angle_epsilon)
    }
}

impl std::fmt::Display for Pose2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.theta)
    }
}
